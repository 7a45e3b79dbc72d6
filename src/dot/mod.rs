//! Dot products between feature vectors and dense weight vectors.

mod kernel;

pub use kernel::wd_kernel;

use crate::error::{Result, WdError};
use crate::features::{FeatureCursor, SparseVector};
use rayon::prelude::*;
use std::ops::Range;

/// Capability interface of an explicit feature space.
///
/// Implementors only supply the collapsed, normalized sparse view of each
/// vector; every dot product is computed from that view, so two feature
/// objects of different kinds can be combined as long as their
/// dimensions agree.
pub trait DotFeatures: Send + Sync {
    /// Dimensionality of the explicit feature space.
    fn dim_feature_space(&self) -> usize;

    /// Number of vectors.
    fn num_vectors(&self) -> usize;

    /// Collapsed, normalized features of vector `index`, ascending by index.
    fn sparse_vector(&self, index: usize) -> Result<SparseVector>;

    /// Independent deep copy.
    fn duplicate(&self) -> Box<dyn DotFeatures>;

    /// Dot product between vector `index` and vector `other_index` of `other`.
    fn dot(&self, index: usize, other: &dyn DotFeatures, other_index: usize) -> Result<f64> {
        if other.dim_feature_space() != self.dim_feature_space() {
            return Err(WdError::DimensionMismatch {
                expected: self.dim_feature_space(),
                actual: other.dim_feature_space(),
            });
        }
        let a = self.sparse_vector(index)?;
        let b = other.sparse_vector(other_index)?;
        Ok(a.dot(&b))
    }

    /// Dot product between vector `index` and a dense vector.
    fn dense_dot(&self, index: usize, dense: &[f64]) -> Result<f64> {
        check_dense(self.dim_feature_space(), dense.len())?;
        self.sparse_vector(index)?.dense_dot(dense)
    }

    /// Adds `alpha` times vector `index` into `dense`.
    ///
    /// With `abs_val` set the absolute feature values are added. `dense`
    /// is left untouched on error.
    fn add_to_dense(&self, alpha: f64, index: usize, dense: &mut [f64], abs_val: bool) -> Result<()> {
        check_dense(self.dim_feature_space(), dense.len())?;
        self.sparse_vector(index)?.add_to_dense(alpha, dense, abs_val)
    }

    /// Number of distinct feature indices touched by vector `index`.
    fn nnz_features(&self, index: usize) -> Result<usize> {
        Ok(self.sparse_vector(index)?.nnz())
    }

    /// Opens a cursor over the nonzero features of vector `index`.
    fn feature_iterator(&self, index: usize) -> Result<FeatureCursor> {
        Ok(FeatureCursor::new(index, self.sparse_vector(index)?))
    }

    /// Materializes vector `index` densely.
    fn dense_vector(&self, index: usize) -> Result<Vec<f64>> {
        Ok(self.sparse_vector(index)?.to_dense())
    }

    /// `dense_dot(i, dense) + bias` for every `i` in `range`, in parallel.
    fn dense_dot_range(&self, range: Range<usize>, dense: &[f64], bias: f64) -> Result<Vec<f64>> {
        check_dense(self.dim_feature_space(), dense.len())?;
        if range.end > self.num_vectors() {
            return Err(WdError::IndexOutOfRange {
                index: range.end.saturating_sub(1),
                count: self.num_vectors(),
            });
        }
        range
            .into_par_iter()
            .map(|i| -> Result<f64> { Ok(self.sparse_vector(i)?.dense_dot(dense)? + bias) })
            .collect()
    }

    /// All pairwise dot products between this object's vectors (rows)
    /// and `other`'s vectors (columns).
    fn gram_matrix(&self, other: &dyn DotFeatures) -> Result<Vec<Vec<f64>>> {
        if other.dim_feature_space() != self.dim_feature_space() {
            return Err(WdError::DimensionMismatch {
                expected: self.dim_feature_space(),
                actual: other.dim_feature_space(),
            });
        }
        let rows: Vec<SparseVector> = (0..self.num_vectors())
            .into_par_iter()
            .map(|i| self.sparse_vector(i))
            .collect::<Result<_>>()?;
        let cols: Vec<SparseVector> = (0..other.num_vectors())
            .into_par_iter()
            .map(|j| other.sparse_vector(j))
            .collect::<Result<_>>()?;

        Ok(rows
            .par_iter()
            .map(|a| cols.iter().map(|b| a.dot(b)).collect::<Vec<f64>>())
            .collect())
    }

    /// Average of all vectors in dense form (all zeros if there are none).
    fn mean_vector(&self) -> Result<Vec<f64>> {
        let mut mean = vec![0.0; self.dim_feature_space()];
        let n = self.num_vectors();
        if n == 0 {
            return Ok(mean);
        }
        let alpha = 1.0 / n as f64;
        for i in 0..n {
            self.add_to_dense(alpha, i, &mut mean, false)?;
        }
        Ok(mean)
    }
}

fn check_dense(expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(WdError::DimensionMismatch { expected, actual });
    }
    Ok(())
}
