//! Weighted-Degree weighting heuristic.

use crate::config::MAX_DEGREE;
use crate::error::{Result, WdError};
use serde::{Deserialize, Serialize};

/// Per-degree weights of the WD kernel.
///
/// The weight of a k-mer of length `d` is
/// `sqrt(2 (F - d + 1) / (F (F + 1)))` with `F = from_degree`, so the
/// squared weights of degrees `1..=F` sum to one and shorter matches
/// carry more weight. Degrees beyond `F` reuse the weight of `F`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightScheme {
    start_degree: usize,
    degree: usize,
    from_degree: usize,
    /// `weights[d - 1]` is the weight of degree `d`.
    weights: Vec<f64>,
}

impl WeightScheme {
    /// Computes the weights for degrees `1..=degree`.
    pub fn new(start_degree: usize, degree: usize, from_degree: usize) -> Result<Self> {
        if start_degree < 1 {
            return Err(WdError::config("start_degree must be at least 1"));
        }
        if degree > MAX_DEGREE {
            return Err(WdError::config(format!(
                "degree ({}) must be <= {}",
                degree, MAX_DEGREE
            )));
        }
        if degree < start_degree {
            return Err(WdError::config(format!(
                "degree ({}) must be >= start_degree ({})",
                degree, start_degree
            )));
        }
        if from_degree < start_degree {
            return Err(WdError::config(format!(
                "from_degree ({}) must be >= start_degree ({})",
                from_degree, start_degree
            )));
        }

        let f = from_degree as f64;
        let weights = (1..=degree)
            .map(|d| {
                let k = d.min(from_degree) as f64;
                (2.0 * (f - k + 1.0) / (f * (f + 1.0))).sqrt()
            })
            .collect();

        Ok(Self {
            start_degree,
            degree,
            from_degree,
            weights,
        })
    }

    /// Weight of k-mers of length `degree` (1-based).
    ///
    /// Returns 0.0 for degrees outside `1..=self.degree()`.
    #[inline]
    pub fn weight(&self, degree: usize) -> f64 {
        match degree.checked_sub(1) {
            Some(i) => self.weights.get(i).copied().unwrap_or(0.0),
            None => 0.0,
        }
    }

    /// All weights, indexed by `degree - 1`.
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Lowest degree included in the feature space.
    #[inline]
    pub fn start_degree(&self) -> usize {
        self.start_degree
    }

    /// Highest degree included in the feature space.
    #[inline]
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Degree at which the weights plateau.
    #[inline]
    pub fn from_degree(&self) -> usize {
        self.from_degree
    }

    /// Sum of squared weights over `start_degree..=degree`, each degree
    /// counted once per start position of a sequence of `length` symbols.
    ///
    /// This is the exact WD self-similarity of such a sequence.
    pub fn self_similarity(&self, length: usize) -> f64 {
        (self.start_degree..=self.degree)
            .filter(|&d| d <= length)
            .map(|d| (length - d + 1) as f64 * self.weight(d).powi(2))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_squared_weights_sum_to_one() {
        let scheme = WeightScheme::new(1, 5, 5).unwrap();
        let total: f64 = scheme.weights().iter().map(|w| w * w).sum();
        assert!((total - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_decreasing_then_plateau() {
        let scheme = WeightScheme::new(1, 6, 3).unwrap();
        assert_eq!(scheme.weights().len(), 6);
        assert!(scheme.weight(1) > scheme.weight(2));
        assert!(scheme.weight(2) > scheme.weight(3));
        assert_eq!(scheme.weight(4), scheme.weight(3));
        assert_eq!(scheme.weight(6), scheme.weight(3));
        assert!(scheme.weights().iter().all(|&w| w > 0.0));
    }

    #[test]
    fn test_known_values() {
        // F = 2: w1 = sqrt(4/6), w2 = sqrt(2/6)
        let scheme = WeightScheme::new(1, 2, 2).unwrap();
        assert!((scheme.weight(1) - (4.0f64 / 6.0).sqrt()).abs() < 1e-12);
        assert!((scheme.weight(2) - (2.0f64 / 6.0).sqrt()).abs() < 1e-12);
        assert_eq!(scheme.weight(0), 0.0);
        assert_eq!(scheme.weight(3), 0.0);
    }

    #[test]
    fn test_deterministic() {
        let a = WeightScheme::new(2, 7, 5).unwrap();
        let b = WeightScheme::new(2, 7, 5).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_invalid() {
        assert!(WeightScheme::new(0, 3, 3).is_err());
        assert!(WeightScheme::new(3, 2, 3).is_err());
        assert!(WeightScheme::new(2, 4, 1).is_err());
    }

    #[test]
    fn test_degree_cap() {
        assert!(WeightScheme::new(1, MAX_DEGREE, 1).is_ok());
        assert!(matches!(
            WeightScheme::new(1, MAX_DEGREE + 1, 1),
            Err(WdError::Config(_))
        ));
        assert!(WeightScheme::new(1, usize::MAX, 1).is_err());
    }

    #[test]
    fn test_self_similarity() {
        let scheme = WeightScheme::new(1, 2, 2).unwrap();
        // length 4: 4 * w1^2 + 3 * w2^2 = 4 * 4/6 + 3 * 2/6
        let expected = 4.0 * 4.0 / 6.0 + 3.0 * 2.0 / 6.0;
        assert!((scheme.self_similarity(4) - expected).abs() < 1e-12);
        assert_eq!(scheme.self_similarity(0), 0.0);
    }
}
