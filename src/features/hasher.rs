//! Bucket hashing of (position, degree, substring) triples.

use crate::config::MAX_HASH_BITS;
use crate::error::{Result, WdError};
use xxhash_rust::xxh64::{xxh64, Xxh64};

/// Maps k-mers to hash buckets in `[0, 2^hash_bits)`.
///
/// Buckets come from xxHash64 over the k-mer bytes. The digest folds in
/// the input length, so equal prefixes of different degree hash apart.
/// With `positional` set the start position is mixed into the seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashMapper {
    seed: u64,
    mask: u64,
    positional: bool,
}

impl HashMapper {
    /// Creates a mapper with `2^hash_bits` buckets.
    ///
    /// `hash_bits` must lie in `1..=MAX_HASH_BITS` so buckets fit a `u32`.
    pub fn new(hash_bits: u32, seed: u64, positional: bool) -> Result<Self> {
        if hash_bits == 0 || hash_bits > MAX_HASH_BITS {
            return Err(WdError::config(format!(
                "hash_bits must be in 1..={}, got {}",
                MAX_HASH_BITS, hash_bits
            )));
        }
        Ok(Self {
            seed,
            mask: (1u64 << hash_bits) - 1,
            positional,
        })
    }

    /// Bucket mask (`bucket_count - 1`).
    #[inline]
    pub fn mask(&self) -> u64 {
        self.mask
    }

    /// Whether start positions are folded into the hash.
    #[inline]
    pub fn is_positional(&self) -> bool {
        self.positional
    }

    /// Seed used for k-mers starting at `position`.
    #[inline]
    fn seed_at(&self, position: usize) -> u64 {
        if self.positional {
            self.seed ^ mix64(position as u64)
        } else {
            self.seed
        }
    }

    /// Bucket of the `degree`-mer `substring` starting at `position`.
    ///
    /// `substring` must be exactly `degree` symbols long.
    pub fn hash(&self, position: usize, degree: usize, substring: &[u8]) -> u32 {
        debug_assert_eq!(substring.len(), degree);
        (xxh64(substring, self.seed_at(position)) & self.mask) as u32
    }

    /// Streaming state for all k-mers starting at `position`.
    ///
    /// Feeding symbols one at a time and calling [`HashMapper::bucket`]
    /// after each yields the same buckets as [`HashMapper::hash`].
    pub fn start(&self, position: usize) -> Xxh64 {
        Xxh64::new(self.seed_at(position))
    }

    /// Bucket of the symbols fed to `state` so far.
    #[inline]
    pub fn bucket(&self, state: &Xxh64) -> u32 {
        (state.digest() & self.mask) as u32
    }
}

/// SplitMix64 finalizer.
#[inline]
fn mix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    x = (x ^ (x >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    x ^ (x >> 31)
}
