//! Fixed symbol alphabets.

use serde::{Deserialize, Serialize};

/// A fixed set of byte symbols.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alphabet {
    /// Human-readable name.
    name: String,
    /// Membership table indexed by byte value.
    #[serde(with = "membership")]
    members: [bool; 256],
    /// Number of symbols.
    size: usize,
}

impl Alphabet {
    /// Creates an alphabet from its symbols. Duplicates are ignored.
    pub fn from_symbols(name: impl Into<String>, symbols: &[u8]) -> Self {
        let mut members = [false; 256];
        for &s in symbols {
            members[s as usize] = true;
        }
        let size = members.iter().filter(|&&m| m).count();
        Self {
            name: name.into(),
            members,
            size,
        }
    }

    /// DNA: `ACGT`.
    pub fn dna() -> Self {
        Self::from_symbols("DNA", b"ACGT")
    }

    /// RNA: `ACGU`.
    pub fn rna() -> Self {
        Self::from_symbols("RNA", b"ACGU")
    }

    /// The 20 standard amino acids.
    pub fn protein() -> Self {
        Self::from_symbols("PROTEIN", b"ACDEFGHIKLMNPQRSTVWY")
    }

    /// Every byte value.
    pub fn raw_bytes() -> Self {
        let symbols: Vec<u8> = (0..=255u8).collect();
        Self::from_symbols("RAWBYTE", &symbols)
    }

    /// Returns the alphabet name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the number of symbols.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Checks whether `symbol` belongs to the alphabet.
    #[inline]
    pub fn contains(&self, symbol: u8) -> bool {
        self.members[symbol as usize]
    }

    /// Returns the position of the first byte not in the alphabet.
    pub fn first_invalid(&self, seq: &[u8]) -> Option<usize> {
        seq.iter().position(|&b| !self.contains(b))
    }
}

mod membership {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(members: &[bool; 256], s: S) -> Result<S::Ok, S::Error> {
        let symbols: Vec<u8> = (0..=255u8).filter(|&b| members[b as usize]).collect();
        symbols.serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<[bool; 256], D::Error> {
        let symbols = Vec::<u8>::deserialize(d)?;
        let mut members = [false; 256];
        for s in symbols {
            members[s as usize] = true;
        }
        Ok(members)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dna() {
        let dna = Alphabet::dna();
        assert_eq!(dna.size(), 4);
        assert!(dna.contains(b'A'));
        assert!(!dna.contains(b'N'));
        assert!(b"ACGT".iter().all(|&b| dna.contains(b)));
        assert_eq!(dna.name(), "DNA");
    }

    #[test]
    fn test_sizes() {
        assert_eq!(Alphabet::rna().size(), 4);
        assert_eq!(Alphabet::protein().size(), 20);
        assert_eq!(Alphabet::raw_bytes().size(), 256);
    }

    #[test]
    fn test_duplicates_ignored() {
        let ab = Alphabet::from_symbols("AB", b"ABBA");
        assert_eq!(ab.size(), 2);
    }

    #[test]
    fn test_first_invalid() {
        let dna = Alphabet::dna();
        assert_eq!(dna.first_invalid(b"ACGT"), None);
        assert_eq!(dna.first_invalid(b"ACNT"), Some(2));
    }

    #[test]
    fn test_serde() {
        let dna = Alphabet::dna();
        let json = serde_json::to_string(&dna).unwrap();
        let back: Alphabet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, dna);
    }
}
