//! Exact (unhashed) Weighted-Degree kernel.

use crate::features::WeightScheme;

/// Position-aligned WD kernel between two sequences.
///
/// Sums `w_d^2` over every start position and degree in
/// `start_degree..=degree` where both sequences carry the same `d`-mer.
/// Positions past the end of the shorter sequence contribute nothing.
pub fn wd_kernel(a: &[u8], b: &[u8], weights: &WeightScheme) -> f64 {
    let len = a.len().min(b.len());
    let start_degree = weights.start_degree();
    let degree = weights.degree();
    let mut sum = 0.0;

    for i in 0..len {
        for d in 1..=degree.min(len - i) {
            if a[i + d - 1] != b[i + d - 1] {
                break;
            }
            if d >= start_degree {
                sum += weights.weight(d).powi(2);
            }
        }
    }

    sum
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_self_kernel() {
        let weights = WeightScheme::new(1, 3, 3).unwrap();
        let k = wd_kernel(b"ACGTAC", b"ACGTAC", &weights);
        assert!((k - weights.self_similarity(6)).abs() < 1e-12);
    }

    #[test]
    fn test_disjoint() {
        let weights = WeightScheme::new(1, 3, 3).unwrap();
        assert_eq!(wd_kernel(b"AAAA", b"CCCC", &weights), 0.0);
    }

    #[test]
    fn test_single_mismatch() {
        let weights = WeightScheme::new(1, 2, 2).unwrap();
        // Matches at positions 0, 2, 3 (degree 1) and 2 (degree 2).
        let k = wd_kernel(b"ACGT", b"AAGT", &weights);
        let expected = 3.0 * weights.weight(1).powi(2) + weights.weight(2).powi(2);
        assert!((k - expected).abs() < 1e-12);
    }

    #[test]
    fn test_start_degree_skips_short_matches() {
        let weights = WeightScheme::new(2, 2, 2).unwrap();
        // Only single-symbol matches: nothing at degree 2.
        assert_eq!(wd_kernel(b"ACAC", b"AGAG", &weights), 0.0);
    }

    #[test]
    fn test_symmetric() {
        let weights = WeightScheme::new(1, 4, 3).unwrap();
        let a = b"GATTACAGATT";
        let b = b"GATCACAGTT";
        assert_eq!(wd_kernel(a, b, &weights), wd_kernel(b, a, &weights));
    }
}
