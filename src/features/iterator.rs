//! Cursor over the nonzero features of one vector.

use crate::error::{Result, WdError};
use crate::features::SparseVector;

/// An owned cursor over one vector's collapsed (index, value) pairs.
///
/// Lifecycle: created by `feature_iterator`, advanced with
/// [`FeatureCursor::advance`], released with [`FeatureCursor::close`].
/// Pairs come out in ascending index order.
#[derive(Debug)]
pub struct FeatureCursor {
    vector_index: usize,
    /// `None` once closed.
    entries: Option<Vec<(usize, f64)>>,
    position: usize,
}

impl FeatureCursor {
    /// Creates a cursor positioned before the first entry of `features`.
    pub fn new(vector_index: usize, features: SparseVector) -> Self {
        Self {
            vector_index,
            entries: Some(features.into_entries()),
            position: 0,
        }
    }

    /// Index of the vector this cursor walks.
    #[inline]
    pub fn vector_index(&self) -> usize {
        self.vector_index
    }

    /// Returns true once [`FeatureCursor::close`] has been called.
    #[inline]
    pub fn is_closed(&self) -> bool {
        self.entries.is_none()
    }

    /// Number of entries not yet returned (0 when closed).
    pub fn remaining(&self) -> usize {
        self.entries
            .as_ref()
            .map_or(0, |e| e.len().saturating_sub(self.position))
    }

    /// Returns the next entry, or `None` once exhausted.
    ///
    /// Keeps returning `None` after exhaustion. Fails after close.
    pub fn advance(&mut self) -> Result<Option<(usize, f64)>> {
        let entries = self.entries.as_ref().ok_or_else(|| {
            WdError::IteratorMisuse(format!(
                "advance on closed cursor for vector {}",
                self.vector_index
            ))
        })?;

        let next = entries.get(self.position).copied();
        if next.is_some() {
            self.position += 1;
        }
        Ok(next)
    }

    /// Releases the backing storage. Fails if already closed.
    pub fn close(&mut self) -> Result<()> {
        if self.entries.take().is_none() {
            return Err(WdError::IteratorMisuse(format!(
                "cursor for vector {} closed twice",
                self.vector_index
            )));
        }
        self.position = 0;
        Ok(())
    }
}
