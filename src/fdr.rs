//! False-discovery-rate adjustment of p-values
//!
//! Benjamini-Hochberg step-up adjustment with an optional pi0 prior (the
//! estimated proportion of true null hypotheses). With pi0 = 1 this is
//! R's p.adjust(method="BH").

use crate::error::{Result, StatError};
use crate::stats::cummin;

/// Adjust p-values for multiple testing, controlling the false discovery rate.
/// R equivalent: p.adjust(method="BH") scaled by pi0
///
/// NaN entries mark missing tests: they stay NaN in the output and do not
/// count toward the number of tests. `pi0` must lie in [0, 1]; it defaults
/// to 1 in the usual BH procedure and callers with an estimate of the null
/// proportion can pass something smaller to sharpen the q-values.
///
/// Returns q-values in the same order as the input. Sorting the input by
/// ascending p-value, the q-values are non-decreasing: the cumulative
/// minimum over the descending-sorted adjusted values guarantees a larger
/// p-value never receives a smaller q-value.
pub fn fdr(pvalues: &[f64], pi0: f64) -> Result<Vec<f64>> {
    if !(0.0..=1.0).contains(&pi0) {
        return Err(StatError::InvalidParameter {
            reason: format!("pi0 must lie in [0, 1], got {}", pi0),
        });
    }

    let n = pvalues.len();
    let mut q = vec![f64::NAN; n];

    // Indices of present (non-NaN) values, sorted by descending p-value.
    // The sort is stable; tied p-values end up with identical q-values
    // after the cumulative minimum, so tie order does not matter.
    let mut present: Vec<usize> = (0..n).filter(|&i| !pvalues[i].is_nan()).collect();
    present.sort_by(|&a, &b| pvalues[b].partial_cmp(&pvalues[a]).unwrap());

    let m = present.len();
    if m == 0 {
        return Ok(q);
    }

    // Step-up values over descending p with ranks m, m-1, ..., 1:
    // the k-th largest p-value gets pi0 * m / (m - k) * p, clipped at 1.
    let raw: Vec<f64> = present
        .iter()
        .enumerate()
        .map(|(k, &i)| (pi0 * m as f64 / (m - k) as f64 * pvalues[i]).min(1.0))
        .collect();

    // Running minimum enforces monotonicity, then scatter back to the
    // original positions.
    for (&i, &adj) in present.iter().zip(cummin(&raw).iter()) {
        q[i] = adj;
    }

    Ok(q)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fdr_adjusted_at_least_p() {
        // Under pi0 = 1, q >= p always holds
        let pvalues = vec![0.001, 0.01, 0.04, 0.03, 0.02, 0.9];
        let q = fdr(&pvalues, 1.0).unwrap();

        for (p, adj) in pvalues.iter().zip(q.iter()) {
            assert!(*adj >= *p, "q {} should be >= p {}", adj, p);
            assert!(*adj <= 1.0);
        }
    }

    #[test]
    fn test_fdr_monotone_in_p() {
        let pvalues = vec![0.05, 0.001, 0.7, 0.01, 0.3, 0.1];
        let q = fdr(&pvalues, 1.0).unwrap();

        let mut order: Vec<usize> = (0..pvalues.len()).collect();
        order.sort_by(|&a, &b| pvalues[a].partial_cmp(&pvalues[b]).unwrap());

        for pair in order.windows(2) {
            assert!(
                q[pair[0]] <= q[pair[1]],
                "q-values must be non-decreasing along ascending p"
            );
        }
    }

    #[test]
    fn test_fdr_ties() {
        // All-tied p-values collapse to the rank-m adjustment: 0.5 * n / n
        let pvalues = vec![0.5; 4];
        let q = fdr(&pvalues, 1.0).unwrap();
        for adj in &q {
            assert!((adj - 0.5).abs() < 1e-12, "expected 0.5, got {}", adj);
        }
    }

    #[test]
    fn test_fdr_nan_passthrough() {
        let pvalues = vec![0.01, f64::NAN, 0.03, 0.02, f64::NAN];
        let q = fdr(&pvalues, 1.0).unwrap();

        assert!(q[1].is_nan());
        assert!(q[4].is_nan());

        // The present positions match the adjustment of the dense vector
        let dense = fdr(&[0.01, 0.03, 0.02], 1.0).unwrap();
        assert_eq!(q[0], dense[0]);
        assert_eq!(q[2], dense[1]);
        assert_eq!(q[3], dense[2]);
    }

    #[test]
    fn test_fdr_pi0_scales() {
        let pvalues = vec![0.01, 0.02, 0.04];
        let full = fdr(&pvalues, 1.0).unwrap();
        let half = fdr(&pvalues, 0.5).unwrap();

        for (f, h) in full.iter().zip(half.iter()) {
            assert!((h - 0.5 * f).abs() < 1e-12);
        }
    }

    #[test]
    fn test_fdr_invalid_pi0() {
        let pvalues = vec![0.1, 0.2];
        assert!(matches!(
            fdr(&pvalues, -0.1),
            Err(StatError::InvalidParameter { .. })
        ));
        assert!(matches!(
            fdr(&pvalues, 1.5),
            Err(StatError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_fdr_empty() {
        assert!(fdr(&[], 1.0).unwrap().is_empty());
    }

    #[test]
    fn test_fdr_all_zero() {
        let q = fdr(&[0.0; 5], 0.8).unwrap();
        assert!(q.iter().all(|&adj| adj == 0.0));
    }

    #[test]
    fn test_fdr_all_nan() {
        let q = fdr(&[f64::NAN, f64::NAN], 1.0).unwrap();
        assert!(q.iter().all(|adj| adj.is_nan()));
    }
}
