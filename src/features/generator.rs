//! Contribution streams of single sequences.

use crate::features::{HashMapper, SparseVector, WeightScheme};

/// One weighted hit in the explicit feature space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureContribution {
    /// Global index in `[0, w_dim)`.
    pub index: usize,
    /// Weight of the k-mer's degree.
    pub value: f64,
}

/// Enumerates the (index, weight) contributions of a sequence.
///
/// Every start position `p` and degree `d` in `start_degree..=degree`
/// with `p + d <= len` yields one contribution at
/// `bucket + (d - start_degree) * bucket_count`.
#[derive(Debug, Clone, Copy)]
pub struct FeatureGenerator<'a> {
    weights: &'a WeightScheme,
    hasher: &'a HashMapper,
    bucket_count: usize,
}

impl<'a> FeatureGenerator<'a> {
    /// Creates a generator over shared weights and hasher.
    pub fn new(weights: &'a WeightScheme, hasher: &'a HashMapper) -> Self {
        Self {
            weights,
            hasher,
            bucket_count: (hasher.mask() + 1) as usize,
        }
    }

    /// Dimension of the feature space the generator emits into.
    #[inline]
    pub fn dimension(&self) -> usize {
        self.bucket_count * (self.weights.degree() - self.weights.start_degree() + 1)
    }

    /// Upper bound on the number of contributions for a sequence of `len` symbols.
    pub fn max_contributions(&self, len: usize) -> usize {
        (self.weights.start_degree()..=self.weights.degree())
            .filter(|&d| d <= len)
            .map(|d| len - d + 1)
            .sum()
    }

    /// Calls `f` for every contribution of `seq`, in position-major order.
    pub fn for_each<F>(&self, seq: &[u8], mut f: F)
    where
        F: FnMut(FeatureContribution),
    {
        let start_degree = self.weights.start_degree();
        let degree = self.weights.degree();

        for p in 0..seq.len() {
            let lim = degree.min(seq.len() - p);
            let mut state = self.hasher.start(p);

            for d in 1..=lim {
                state.update(&seq[p + d - 1..p + d]);
                if d < start_degree {
                    continue;
                }
                let bucket = self.hasher.bucket(&state) as usize;
                f(FeatureContribution {
                    index: bucket + (d - start_degree) * self.bucket_count,
                    value: self.weights.weight(d),
                });
            }
        }
    }

    /// Collects every contribution of `seq`.
    pub fn generate(&self, seq: &[u8]) -> Vec<FeatureContribution> {
        let mut out = Vec::with_capacity(self.max_contributions(seq.len()));
        self.for_each(seq, |c| out.push(c));
        out
    }

    /// Collapses the contributions of `seq` into a canonical sparse vector.
    pub fn collapse(&self, seq: &[u8]) -> SparseVector {
        SparseVector::from_contributions(self.generate(seq), self.dimension())
    }
}
