//! Feature magnitude normalization.

use crate::error::{Result, WdError};
use crate::features::WeightScheme;
use once_cell::sync::OnceCell;

/// Holds the normalization constant of a feature space.
///
/// Features are divided by the constant. A configured value of 0.0
/// selects auto mode: the constant is derived on first use, exactly
/// once, and shared by every later call (and by clones made after).
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    configured: f64,
    resolved: OnceCell<f64>,
}

impl Normalizer {
    /// Creates a normalizer; `configured == 0.0` means auto.
    pub fn new(configured: f64) -> Result<Self> {
        check(configured)?;
        Ok(Self {
            configured,
            resolved: OnceCell::new(),
        })
    }

    /// Returns true if the constant is derived automatically.
    #[inline]
    pub fn is_auto(&self) -> bool {
        self.configured == 0.0
    }

    /// Replaces the constant; 0.0 switches back to auto mode.
    pub fn set(&mut self, configured: f64) -> Result<()> {
        check(configured)?;
        self.configured = configured;
        self.resolved = OnceCell::new();
        Ok(())
    }

    /// Returns the constant, running `derive` once in auto mode.
    ///
    /// Concurrent first calls block until a single `derive` finishes.
    pub fn constant<F>(&self, derive: F) -> f64
    where
        F: FnOnce() -> f64,
    {
        if !self.is_auto() {
            return self.configured;
        }
        *self.resolved.get_or_init(|| {
            let n = derive();
            log::debug!("auto normalization constant: {}", n);
            n
        })
    }

    /// Auto constant for sequences up to `reference_length` symbols.
    ///
    /// The square root of the exact WD self-similarity of a sequence of
    /// that length, or 1.0 if that is zero.
    pub fn auto_constant(weights: &WeightScheme, reference_length: usize) -> f64 {
        let n = weights.self_similarity(reference_length).sqrt();
        if n > 0.0 && n.is_finite() {
            n
        } else {
            1.0
        }
    }
}

fn check(n: f64) -> Result<()> {
    if !n.is_finite() || n < 0.0 {
        return Err(WdError::config(format!(
            "normalization constant must be finite and non-negative, got {}",
            n
        )));
    }
    Ok(())
}
