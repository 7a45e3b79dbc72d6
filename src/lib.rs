//! # hashed-wd - Hashed Weighted-Degree String Kernel Features
//!
//! Explicit, fixed-dimension feature vectors for symbol sequences that
//! approximate the Weighted-Degree (WD) string kernel. Feature hashing
//! bounds memory regardless of alphabet size or degree.
//!
//! ## Overview
//!
//! The WD kernel counts position-aligned substring matches of lengths
//! `start_degree..=degree`, each degree weighted by a fixed coefficient.
//! Its true feature space is indexed by (position, degree, k-mer) and is
//! exponentially large. Here every such triple is hashed into one of
//! `2^hash_bits` buckets of its degree's sub-space, giving a space of
//! dimension `2^hash_bits * (degree - start_degree + 1)` that linear
//! learners can work in directly.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use hashed_wd::{Alphabet, DotFeatures, HashedWdConfig, HashedWdFeatures, SequenceCollection};
//! use std::sync::Arc;
//!
//! let strings = SequenceCollection::from_strs(Alphabet::dna(), &["ACGTACGT", "ACGAACGT"])?;
//! let features = HashedWdFeatures::new(Arc::new(strings), HashedWdConfig::new(1, 3, 3, 12))?;
//!
//! // Kernel value between two sequences
//! let k = features.dot(0, &features, 1)?;
//!
//! // Score against a linear model
//! let w = vec![0.0; features.dim_feature_space()];
//! let score = features.dense_dot(0, &w)?;
//! ```
//!
//! ## Architecture
//!
//! - [`sequence`] - Sequence sources and alphabets
//! - [`features`] - Weights, hashing, contribution generation, normalization
//! - [`dot`] - The [`DotFeatures`] capability and the exact reference kernel

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod dot;
pub mod error;
pub mod features;
pub mod sequence;

// Re-export commonly used types
pub use config::{HashedWdConfig, DEFAULT_HASH_BITS, MAX_DEGREE, MAX_HASH_BITS};
pub use dot::{wd_kernel, DotFeatures};
pub use error::{Result, WdError};
pub use features::{
    FeatureContribution, FeatureCursor, FeatureGenerator, HashMapper, HashedWdFeatures, Normalizer,
    SparseVector, WeightScheme,
};
pub use sequence::{Alphabet, SequenceCollection, SequenceSource};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_default_hash_bits() {
        assert_eq!(DEFAULT_HASH_BITS, 12);
        assert_eq!(HashedWdConfig::default().bucket_count(), 4096);
    }
}
