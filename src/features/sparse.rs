//! Collapsed sparse feature vectors.

use crate::error::{Result, WdError};
use crate::features::FeatureContribution;
use serde::{Deserialize, Serialize};

/// A canonical sparse vector: distinct indices in ascending order.
///
/// Built by collapsing a contribution stream, summing the values of
/// contributions that share an index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SparseVectorRepr")]
pub struct SparseVector {
    /// (index, value) pairs, strictly ascending by index.
    entries: Vec<(usize, f64)>,
    /// Dimension of the space the vector lives in.
    dim: usize,
}

/// Wire form of [`SparseVector`], checked before use.
#[derive(Deserialize)]
struct SparseVectorRepr {
    entries: Vec<(usize, f64)>,
    dim: usize,
}

impl TryFrom<SparseVectorRepr> for SparseVector {
    type Error = WdError;

    fn try_from(repr: SparseVectorRepr) -> Result<Self> {
        let mut prev: Option<usize> = None;
        for &(index, _) in &repr.entries {
            if index >= repr.dim {
                return Err(WdError::Serialization(format!(
                    "sparse index {} outside dimension {}",
                    index, repr.dim
                )));
            }
            if prev.map_or(false, |p| index <= p) {
                return Err(WdError::Serialization(format!(
                    "sparse indices not strictly ascending at {}",
                    index
                )));
            }
            prev = Some(index);
        }
        Ok(Self {
            entries: repr.entries,
            dim: repr.dim,
        })
    }
}

impl SparseVector {
    /// Creates an empty vector of the given dimension.
    pub fn new(dim: usize) -> Self {
        Self {
            entries: Vec::new(),
            dim,
        }
    }

    /// Collapses a contribution stream into canonical form.
    pub fn from_contributions<I>(contributions: I, dim: usize) -> Self
    where
        I: IntoIterator<Item = FeatureContribution>,
    {
        let pairs = contributions.into_iter().map(|c| (c.index, c.value));
        Self::from_pairs(pairs, dim)
    }

    /// Collapses arbitrary (index, value) pairs, summing duplicates.
    ///
    /// Pairs with an index outside `[0, dim)` are dropped.
    pub fn from_pairs<I>(pairs: I, dim: usize) -> Self
    where
        I: IntoIterator<Item = (usize, f64)>,
    {
        let mut raw: Vec<(usize, f64)> = pairs.into_iter().filter(|&(i, _)| i < dim).collect();
        raw.sort_by_key(|&(i, _)| i);

        let mut entries: Vec<(usize, f64)> = Vec::with_capacity(raw.len());
        for (index, value) in raw {
            match entries.last_mut() {
                Some(last) if last.0 == index => last.1 += value,
                _ => entries.push((index, value)),
            }
        }

        Self { entries, dim }
    }

    /// Creates a sparse vector from the nonzero entries of a dense one.
    pub fn from_dense(dense: &[f64]) -> Self {
        let entries = dense
            .iter()
            .enumerate()
            .filter(|(_, &v)| v != 0.0)
            .map(|(i, &v)| (i, v))
            .collect();
        Self {
            entries,
            dim: dense.len(),
        }
    }

    /// Dimension of the vector.
    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Number of stored (distinct) indices.
    #[inline]
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    /// Checks if the vector has no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the stored entries in ascending index order.
    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    /// Returns an iterator over (index, value) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.entries.iter().copied()
    }

    /// Consumes the vector, returning its entries.
    pub fn into_entries(self) -> Vec<(usize, f64)> {
        self.entries
    }

    /// Value at `index` (0.0 if absent).
    pub fn get(&self, index: usize) -> f64 {
        self.entries
            .binary_search_by_key(&index, |&(i, _)| i)
            .map(|pos| self.entries[pos].1)
            .unwrap_or(0.0)
    }

    /// Multiplies every value by `factor`.
    pub fn scale(&mut self, factor: f64) {
        for (_, v) in &mut self.entries {
            *v *= factor;
        }
    }

    /// Squared Euclidean norm.
    pub fn norm_squared(&self) -> f64 {
        self.entries.iter().map(|&(_, v)| v * v).sum()
    }

    /// Sparse dot product (merge join over the sorted indices).
    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (a, b) = (&self.entries, &other.entries);
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;

        while i < a.len() && j < b.len() {
            match a[i].0.cmp(&b[j].0) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += a[i].1 * b[j].1;
                    i += 1;
                    j += 1;
                }
            }
        }

        sum
    }

    /// Dot product with a dense vector of the same dimension.
    pub fn dense_dot(&self, dense: &[f64]) -> Result<f64> {
        self.check_dense(dense.len())?;
        Ok(self.entries.iter().map(|&(i, v)| v * dense[i]).sum())
    }

    /// Adds `alpha * self` (or `alpha * |self|`) into `dense`.
    ///
    /// `dense` is left untouched when the dimensions disagree.
    pub fn add_to_dense(&self, alpha: f64, dense: &mut [f64], abs_val: bool) -> Result<()> {
        self.check_dense(dense.len())?;
        for &(i, v) in &self.entries {
            let v = if abs_val { v.abs() } else { v };
            dense[i] += alpha * v;
        }
        Ok(())
    }

    /// Creates a dense vector representation.
    pub fn to_dense(&self) -> Vec<f64> {
        let mut dense = vec![0.0; self.dim];
        for &(i, v) in &self.entries {
            dense[i] = v;
        }
        dense
    }

    fn check_dense(&self, len: usize) -> Result<()> {
        if len != self.dim {
            return Err(WdError::DimensionMismatch {
                expected: self.dim,
                actual: len,
            });
        }
        Ok(())
    }
}
