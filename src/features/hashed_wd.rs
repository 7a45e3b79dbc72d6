//! Hashed explicit feature space of the Weighted-Degree kernel.

use crate::config::HashedWdConfig;
use crate::dot::{wd_kernel, DotFeatures};
use crate::error::{Result, WdError};
use crate::features::{
    FeatureContribution, FeatureGenerator, HashMapper, Normalizer, SparseVector, WeightScheme,
};
use crate::sequence::{SequenceCollection, SequenceSource};
use log::{debug, warn};
use std::sync::Arc;

/// Features that compute the WD kernel feature space explicitly.
///
/// Every k-mer of length `start_degree..=degree` is hashed into one of
/// `2^hash_bits` buckets of its degree's sub-space; the sub-spaces are
/// concatenated, giving `w_dim = 2^hash_bits * (degree - start_degree + 1)`.
pub struct HashedWdFeatures<S: SequenceSource + 'static = SequenceCollection> {
    /// Sequences the features are computed from.
    strings: Arc<S>,
    config: HashedWdConfig,
    weights: WeightScheme,
    hasher: HashMapper,
    normalizer: Normalizer,
    /// Dimension of the feature space.
    w_dim: usize,
}

impl<S: SequenceSource + 'static> HashedWdFeatures<S> {
    /// Creates the feature space over `strings`.
    pub fn new(strings: Arc<S>, config: HashedWdConfig) -> Result<Self> {
        config.validate()?;

        let alphabet_size = strings.alphabet_size();
        if alphabet_size == 0 {
            return Err(WdError::config("alphabet must not be empty"));
        }

        let weights = WeightScheme::new(
            config.start_degree,
            config.degree,
            config.effective_from_degree(),
        )?;
        let hasher = HashMapper::new(config.hash_bits, config.seed, config.positional)?;
        let normalizer = Normalizer::new(config.normalization)?;
        let w_dim = config.dimension();

        let max_length = strings.max_length();
        if strings.count() > 0 && config.degree > max_length {
            warn!(
                "degree {} exceeds the longest sequence ({}); higher degree sub-spaces stay empty",
                config.degree, max_length
            );
        }

        debug!(
            "created HashedWdFeatures with d={} ({}..{}, from {}), alphabet_size={}, dim={}, buckets={}, num={}, max_len={}, same_length={}",
            config.degree,
            config.start_degree,
            config.degree,
            config.effective_from_degree(),
            alphabet_size,
            w_dim,
            config.bucket_count(),
            strings.count(),
            max_length,
            strings.have_same_length()
        );

        Ok(Self {
            strings,
            config,
            weights,
            hasher,
            normalizer,
            w_dim,
        })
    }

    /// Creates the feature space from the four core parameters.
    pub fn with_degrees(
        strings: Arc<S>,
        start_degree: usize,
        degree: usize,
        from_degree: usize,
        hash_bits: u32,
    ) -> Result<Self> {
        Self::new(
            strings,
            HashedWdConfig::new(start_degree, degree, from_degree, hash_bits),
        )
    }

    /// Returns the configuration.
    pub fn config(&self) -> &HashedWdConfig {
        &self.config
    }

    /// Returns the underlying sequences.
    pub fn strings(&self) -> &Arc<S> {
        &self.strings
    }

    /// Returns the per-degree weights.
    pub fn weights(&self) -> &WeightScheme {
        &self.weights
    }

    /// Returns the bucket hasher.
    pub fn hasher(&self) -> &HashMapper {
        &self.hasher
    }

    /// Number of hash buckets per degree.
    #[inline]
    pub fn bucket_count(&self) -> usize {
        self.config.bucket_count()
    }

    /// Generator borrowing this space's weights and hasher.
    pub fn generator(&self) -> FeatureGenerator<'_> {
        FeatureGenerator::new(&self.weights, &self.hasher)
    }

    /// Raw, unnormalized contributions of sequence `index`.
    pub fn contributions(&self, index: usize) -> Result<Vec<FeatureContribution>> {
        let seq = self.strings.bytes(index)?;
        Ok(self.generator().generate(seq))
    }

    /// Collapsed, unnormalized features of sequence `index`.
    pub fn collapsed(&self, index: usize) -> Result<SparseVector> {
        let seq = self.strings.bytes(index)?;
        Ok(self.generator().collapse(seq))
    }

    /// Sets the normalization constant; 0.0 means derive it automatically.
    pub fn set_normalization_const(&mut self, n: f64) -> Result<()> {
        self.normalizer.set(n)?;
        self.config.normalization = n;
        Ok(())
    }

    /// Returns the normalization constant, deriving it on first use in auto mode.
    pub fn normalization_const(&self) -> f64 {
        self.normalizer
            .constant(|| Normalizer::auto_constant(&self.weights, self.strings.max_length()))
    }

    /// Exact WD kernel between sequences `a` and `b`, normalized like
    /// [`DotFeatures::dot`].
    pub fn exact_kernel(&self, a: usize, b: usize) -> Result<f64> {
        let seq_a = self.strings.bytes(a)?;
        let seq_b = self.strings.bytes(b)?;
        let n = self.normalization_const();
        Ok(wd_kernel(seq_a, seq_b, &self.weights) / (n * n))
    }
}

impl<S: SequenceSource + 'static> Clone for HashedWdFeatures<S> {
    fn clone(&self) -> Self {
        Self {
            strings: Arc::clone(&self.strings),
            config: self.config.clone(),
            weights: self.weights.clone(),
            hasher: self.hasher,
            normalizer: self.normalizer.clone(),
            w_dim: self.w_dim,
        }
    }
}

impl<S: SequenceSource + 'static> std::fmt::Debug for HashedWdFeatures<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HashedWdFeatures")
            .field("config", &self.config)
            .field("num_vectors", &self.strings.count())
            .field("w_dim", &self.w_dim)
            .finish()
    }
}

impl<S: SequenceSource + 'static> DotFeatures for HashedWdFeatures<S> {
    fn dim_feature_space(&self) -> usize {
        self.w_dim
    }

    fn num_vectors(&self) -> usize {
        self.strings.count()
    }

    fn sparse_vector(&self, index: usize) -> Result<SparseVector> {
        let mut features = self.collapsed(index)?;
        features.scale(1.0 / self.normalization_const());
        Ok(features)
    }

    fn duplicate(&self) -> Box<dyn DotFeatures> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence::Alphabet;

    fn features(seqs: &[&str], config: HashedWdConfig) -> HashedWdFeatures {
        let strings = SequenceCollection::from_strs(Alphabet::dna(), seqs).unwrap();
        HashedWdFeatures::new(Arc::new(strings), config).unwrap()
    }

    #[test]
    fn test_dimension() {
        let f = features(&["ACGT"], HashedWdConfig::new(1, 2, 2, 4));
        assert_eq!(f.dim_feature_space(), 32);
        assert_eq!(f.bucket_count(), 16);
        assert_eq!(f.num_vectors(), 1);

        let f = features(&["ACGT"], HashedWdConfig::new(2, 5, 5, 6));
        assert_eq!(f.dim_feature_space(), 64 * 4);
    }

    #[test]
    fn test_invalid_config() {
        let strings = Arc::new(SequenceCollection::from_strs(Alphabet::dna(), &["ACGT"]).unwrap());
        assert!(HashedWdFeatures::with_degrees(Arc::clone(&strings), 3, 2, 3, 4).is_err());
        assert!(HashedWdFeatures::with_degrees(Arc::clone(&strings), 2, 3, 1, 4).is_err());
        assert!(HashedWdFeatures::with_degrees(Arc::clone(&strings), 1, 3, 3, 0).is_err());
        assert!(HashedWdFeatures::with_degrees(strings, 1, 3, 3, 4).is_ok());
    }

    /// Source reporting an empty alphabet.
    struct NoSymbols;

    impl SequenceSource for NoSymbols {
        fn count(&self) -> usize {
            1
        }

        fn length(&self, _index: usize) -> Result<usize> {
            Ok(4)
        }

        fn bytes(&self, _index: usize) -> Result<&[u8]> {
            Ok(b"ACGT")
        }

        fn alphabet_size(&self) -> usize {
            0
        }
    }

    #[test]
    fn test_empty_alphabet_rejected() {
        let result = HashedWdFeatures::new(Arc::new(NoSymbols), HashedWdConfig::new(1, 2, 2, 4));
        assert!(matches!(result, Err(WdError::Config(_))));
    }

    #[test]
    fn test_huge_degree_rejected() {
        let strings = Arc::new(SequenceCollection::from_strs(Alphabet::dna(), &["ACGT"]).unwrap());
        let result = HashedWdFeatures::with_degrees(Arc::clone(&strings), 1, usize::MAX, 1, 4);
        assert!(matches!(result, Err(WdError::Config(_))));
        assert!(HashedWdFeatures::with_degrees(strings, 1, 1 << 40, 1, 4).is_err());
    }

    #[test]
    fn test_acgt_scenario() {
        let f = features(&["ACGT"], HashedWdConfig::new(1, 2, 2, 4));
        assert_eq!(f.contributions(0).unwrap().len(), 7);

        let collapsed = f.collapsed(0).unwrap();
        let nnz = f.nnz_features(0).unwrap();
        assert_eq!(nnz, collapsed.nnz());
        assert!(nnz >= 1 && nnz <= 7);

        let n = f.normalization_const();
        let expected = collapsed.norm_squared() / (n * n);
        let dot = f.dot(0, &f, 0).unwrap();
        assert!(dot > 0.0);
        assert!((dot - expected).abs() < 1e-12);
    }

    #[test]
    fn test_auto_normalization_value() {
        let f = features(&["ACGTAC", "ACG"], HashedWdConfig::new(1, 3, 3, 8));
        let n = f.normalization_const();
        assert!((n * n - f.weights().self_similarity(6)).abs() < 1e-12);
    }

    #[test]
    fn test_explicit_normalization() {
        let mut f = features(&["ACGT"], HashedWdConfig::new(1, 2, 2, 6));
        f.set_normalization_const(2.0).unwrap();
        assert_eq!(f.normalization_const(), 2.0);
        assert_eq!(f.config().normalization, 2.0);

        let raw = f.collapsed(0).unwrap().norm_squared();
        assert!((f.dot(0, &f, 0).unwrap() - raw / 4.0).abs() < 1e-12);

        f.set_normalization_const(0.0).unwrap();
        assert!((f.normalization_const().powi(2) - f.weights().self_similarity(4)).abs() < 1e-12);
        assert!(f.set_normalization_const(-3.0).is_err());
    }

    #[test]
    fn test_out_of_range() {
        let f = features(&["ACGT"], HashedWdConfig::new(1, 2, 2, 4));
        assert!(matches!(
            f.nnz_features(1),
            Err(WdError::IndexOutOfRange { index: 1, count: 1 })
        ));
        assert!(f.feature_iterator(1).is_err());
        assert!(f.dense_dot(4, &vec![0.0; 32]).is_err());
    }

    #[test]
    fn test_duplicate_is_independent() {
        let mut f = features(&["ACGT", "AGGT"], HashedWdConfig::new(1, 2, 2, 6));
        let before = f.dot(0, &f, 1).unwrap();
        let copy = f.duplicate();

        f.set_normalization_const(10.0).unwrap();
        assert!((copy.dot(0, copy.as_ref(), 1).unwrap() - before).abs() < 1e-12);
        assert_eq!(copy.dim_feature_space(), f.dim_feature_space());
    }

    #[test]
    fn test_exact_kernel_lower_bound() {
        let f = features(&["ACGTACGT", "ACGAACGT"], HashedWdConfig::new(1, 3, 3, 6));
        for i in 0..2 {
            for j in 0..2 {
                let hashed = f.dot(i, &f, j).unwrap();
                let exact = f.exact_kernel(i, j).unwrap();
                assert!(hashed >= exact - 1e-12);
            }
        }
    }

    #[test]
    fn test_debug() {
        let f = features(&["ACGT"], HashedWdConfig::new(1, 2, 2, 4));
        let s = format!("{:?}", f);
        assert!(s.contains("w_dim: 32"));
    }
}
