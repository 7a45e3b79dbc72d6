//! Symbol sequences the feature space is computed over.

mod alphabet;
mod collection;

pub use alphabet::Alphabet;
pub use collection::SequenceCollection;

use crate::error::Result;

/// Read-only access to an ordered collection of symbol sequences.
///
/// The feature space never mutates its source, so any storage that can
/// hand out borrowed byte slices can back it.
pub trait SequenceSource: Send + Sync {
    /// Number of sequences.
    fn count(&self) -> usize;

    /// Length of the sequence at `index`.
    fn length(&self, index: usize) -> Result<usize>;

    /// Raw symbols of the sequence at `index`.
    fn bytes(&self, index: usize) -> Result<&[u8]>;

    /// Number of distinct symbols in the alphabet.
    fn alphabet_size(&self) -> usize;

    /// Checks whether all sequences share one length.
    fn have_same_length(&self) -> bool {
        let mut lengths = (0..self.count()).filter_map(|i| self.length(i).ok());
        match lengths.next() {
            Some(first) => lengths.all(|len| len == first),
            None => true,
        }
    }

    /// Length of the longest sequence (0 for an empty collection).
    fn max_length(&self) -> usize {
        (0..self.count())
            .filter_map(|i| self.length(i).ok())
            .max()
            .unwrap_or(0)
    }
}
