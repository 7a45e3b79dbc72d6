//! In-memory sequence collection.

use crate::error::{Result, WdError};
use crate::sequence::{Alphabet, SequenceSource};
use log::debug;

/// An ordered, validated collection of sequences over one alphabet.
#[derive(Debug, Clone)]
pub struct SequenceCollection {
    alphabet: Alphabet,
    sequences: Vec<Vec<u8>>,
}

impl SequenceCollection {
    /// Creates a collection, checking every symbol against the alphabet.
    pub fn new(alphabet: Alphabet, sequences: Vec<Vec<u8>>) -> Result<Self> {
        if alphabet.size() == 0 {
            return Err(WdError::config("alphabet must not be empty"));
        }
        for (i, seq) in sequences.iter().enumerate() {
            if let Some(pos) = alphabet.first_invalid(seq) {
                return Err(WdError::InvalidSymbol {
                    sequence: i,
                    position: pos,
                    symbol: seq[pos],
                });
            }
        }
        debug!(
            "loaded {} sequences over alphabet {} ({} symbols)",
            sequences.len(),
            alphabet.name(),
            alphabet.size()
        );
        Ok(Self {
            alphabet,
            sequences,
        })
    }

    /// Creates a collection from string slices.
    pub fn from_strs(alphabet: Alphabet, sequences: &[&str]) -> Result<Self> {
        let sequences = sequences.iter().map(|s| s.as_bytes().to_vec()).collect();
        Self::new(alphabet, sequences)
    }

    /// Returns the alphabet.
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Returns true if the collection holds no sequences.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    fn get(&self, index: usize) -> Result<&Vec<u8>> {
        self.sequences.get(index).ok_or(WdError::IndexOutOfRange {
            index,
            count: self.sequences.len(),
        })
    }
}

impl SequenceSource for SequenceCollection {
    fn count(&self) -> usize {
        self.sequences.len()
    }

    fn length(&self, index: usize) -> Result<usize> {
        self.get(index).map(Vec::len)
    }

    fn bytes(&self, index: usize) -> Result<&[u8]> {
        self.get(index).map(Vec::as_slice)
    }

    fn alphabet_size(&self) -> usize {
        self.alphabet.size()
    }

    fn have_same_length(&self) -> bool {
        self.sequences.windows(2).all(|w| w[0].len() == w[1].len())
    }

    fn max_length(&self) -> usize {
        self.sequences.iter().map(Vec::len).max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_access() {
        let coll = SequenceCollection::from_strs(Alphabet::dna(), &["ACGT", "AC"]).unwrap();
        assert_eq!(coll.count(), 2);
        assert_eq!(coll.length(1).unwrap(), 2);
        assert_eq!(coll.bytes(0).unwrap(), b"ACGT");
        assert_eq!(coll.alphabet_size(), 4);
        assert_eq!(coll.max_length(), 4);
        assert!(!coll.have_same_length());
    }

    #[test]
    fn test_out_of_range() {
        let coll = SequenceCollection::from_strs(Alphabet::dna(), &["ACGT"]).unwrap();
        assert!(matches!(
            coll.bytes(1),
            Err(WdError::IndexOutOfRange { index: 1, count: 1 })
        ));
        assert!(coll.length(7).is_err());
    }

    #[test]
    fn test_invalid_symbol() {
        let err = SequenceCollection::from_strs(Alphabet::dna(), &["ACGT", "ACNT"]).unwrap_err();
        match err {
            WdError::InvalidSymbol {
                sequence,
                position,
                symbol,
            } => {
                assert_eq!(sequence, 1);
                assert_eq!(position, 2);
                assert_eq!(symbol, b'N');
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_alphabet() {
        let empty = Alphabet::from_symbols("EMPTY", b"");
        assert!(matches!(
            SequenceCollection::new(empty, vec![]),
            Err(WdError::Config(_))
        ));
    }

    #[test]
    fn test_same_length() {
        let coll = SequenceCollection::from_strs(Alphabet::dna(), &["ACGT", "TTGA"]).unwrap();
        assert!(coll.have_same_length());
        assert_eq!(coll.alphabet().name(), "DNA");
    }

    #[test]
    fn test_empty_collection() {
        let coll = SequenceCollection::new(Alphabet::dna(), vec![]).unwrap();
        assert!(coll.is_empty());
        assert_eq!(coll.max_length(), 0);
        assert!(coll.have_same_length());
    }
}
