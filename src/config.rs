//! Configuration for the hashed Weighted-Degree feature space.

use crate::error::{Result, WdError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default number of hash bits (4096 buckets per degree).
pub const DEFAULT_HASH_BITS: u32 = 12;

/// Largest supported number of hash bits.
pub const MAX_HASH_BITS: u32 = 31;

/// Largest supported degree (k-mer length).
pub const MAX_DEGREE: usize = 4096;

/// Default hash seed.
pub const DEFAULT_SEED: u64 = 0xDEAD_BEAF;

/// Construction-time configuration of a hashed WD feature space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HashedWdConfig {
    /// Lowest k-mer length included.
    /// Default: 1.
    #[serde(default = "default_start_degree")]
    pub start_degree: usize,

    /// Highest k-mer length included.
    /// Default: 8.
    #[serde(default = "default_degree")]
    pub degree: usize,

    /// Degree at which the weights plateau.
    /// Default: None (same as `degree`).
    #[serde(default)]
    pub from_degree: Option<usize>,

    /// log2 of the number of hash buckets per degree.
    /// Default: 12.
    #[serde(default = "default_hash_bits")]
    pub hash_bits: u32,

    /// Fold the start position of each k-mer into its hash.
    /// Default: true (position-aligned WD semantics).
    #[serde(default = "default_positional")]
    pub positional: bool,

    /// Seed of the hash function.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Normalization constant; 0.0 means derive it automatically.
    /// Default: 0.0.
    #[serde(default)]
    pub normalization: f64,
}

fn default_start_degree() -> usize {
    1
}

fn default_degree() -> usize {
    8
}

fn default_hash_bits() -> u32 {
    DEFAULT_HASH_BITS
}

fn default_positional() -> bool {
    true
}

fn default_seed() -> u64 {
    DEFAULT_SEED
}

impl Default for HashedWdConfig {
    fn default() -> Self {
        Self {
            start_degree: default_start_degree(),
            degree: default_degree(),
            from_degree: None,
            hash_bits: default_hash_bits(),
            positional: default_positional(),
            seed: default_seed(),
            normalization: 0.0,
        }
    }
}

impl HashedWdConfig {
    /// Creates a configuration from the four core parameters.
    pub fn new(start_degree: usize, degree: usize, from_degree: usize, hash_bits: u32) -> Self {
        Self {
            start_degree,
            degree,
            from_degree: Some(from_degree),
            hash_bits,
            ..Self::default()
        }
    }

    /// Sets whether the start position is folded into the hash.
    pub fn with_positional(mut self, positional: bool) -> Self {
        self.positional = positional;
        self
    }

    /// Sets the hash seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets a fixed normalization constant (0.0 = auto).
    pub fn with_normalization(mut self, normalization: f64) -> Self {
        self.normalization = normalization;
        self
    }

    /// Degree at which the weights plateau.
    #[inline]
    pub fn effective_from_degree(&self) -> usize {
        self.from_degree.unwrap_or(self.degree)
    }

    /// Number of degrees covered (`degree - start_degree + 1`).
    ///
    /// Only meaningful for a configuration that passes [`HashedWdConfig::validate`].
    #[inline]
    pub fn degree_range(&self) -> usize {
        self.degree.saturating_sub(self.start_degree).saturating_add(1)
    }

    /// Number of hash buckets per degree sub-space.
    #[inline]
    pub fn bucket_count(&self) -> usize {
        1usize.checked_shl(self.hash_bits).unwrap_or(usize::MAX)
    }

    /// Bit mask selecting a bucket from a hash value.
    #[inline]
    pub fn mask(&self) -> u64 {
        1u64.checked_shl(self.hash_bits).map_or(u64::MAX, |b| b - 1)
    }

    /// Dimension of the explicit feature space.
    #[inline]
    pub fn dimension(&self) -> usize {
        self.bucket_count().saturating_mul(self.degree_range())
    }

    /// Checks the configuration for invalid degree ordering and hash sizes.
    pub fn validate(&self) -> Result<()> {
        if self.start_degree < 1 {
            return Err(WdError::config("start_degree must be at least 1"));
        }
        if self.degree > MAX_DEGREE {
            return Err(WdError::config(format!(
                "degree ({}) must be <= {}",
                self.degree, MAX_DEGREE
            )));
        }
        if self.degree < self.start_degree {
            return Err(WdError::config(format!(
                "degree ({}) must be >= start_degree ({})",
                self.degree, self.start_degree
            )));
        }
        let from_degree = self.effective_from_degree();
        if from_degree < self.start_degree {
            return Err(WdError::config(format!(
                "from_degree ({}) must be >= start_degree ({})",
                from_degree, self.start_degree
            )));
        }
        if self.hash_bits == 0 || self.hash_bits > MAX_HASH_BITS {
            return Err(WdError::config(format!(
                "hash_bits must be in 1..={}, got {}",
                MAX_HASH_BITS, self.hash_bits
            )));
        }
        if self
            .bucket_count()
            .checked_mul(self.degree_range())
            .is_none()
        {
            return Err(WdError::config("feature space dimension overflows usize"));
        }
        if !self.normalization.is_finite() || self.normalization < 0.0 {
            return Err(WdError::config(format!(
                "normalization must be finite and non-negative, got {}",
                self.normalization
            )));
        }
        Ok(())
    }

    /// Loads a configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Writes the configuration to a JSON file.
    pub fn to_file(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
