//! Hashed Weighted-Degree feature generation.

mod generator;
mod hashed_wd;
mod hasher;
mod iterator;
mod normalizer;
mod sparse;
mod weights;

pub use generator::{FeatureContribution, FeatureGenerator};
pub use hashed_wd::HashedWdFeatures;
pub use hasher::HashMapper;
pub use iterator::FeatureCursor;
pub use normalizer::Normalizer;
pub use sparse::SparseVector;
pub use weights::WeightScheme;
