//! P-value ROC curves
//!
//! Builds ROC curves by sweeping a decision threshold over p-values from a
//! labeled benchmark, and averages curves from repeated trials. The single
//! curve builder samples a fixed logarithmic/linear threshold grid rather
//! than the raw p-values, so curves from independent trials share
//! comparable resolution down to very small p-values.

mod average;
mod interp;

pub use average::{average_calibration_curves, average_roc_curves, average_sensitivity_curves};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{Result, StatError};
use crate::stats::{searchsorted_left, trapezoid};

/// A p-value-threshold ROC curve.
///
/// The three vectors have equal length and are ordered by ascending
/// threshold; `fpr` and `tpr` are non-decreasing along that order.
///
/// Sentinel contract: when even the smallest grid threshold admits a false
/// positive, [`pvalue_roc_curve`] prepends a synthetic point with a
/// threshold below the whole grid (and therefore negative) and both rates
/// zero, so every curve starts at the origin. The threshold-keyed
/// averaging routines recognize a leading negative threshold as this
/// sentinel and drop it before interpolating.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RocCurve {
    /// False positive rate at each threshold
    pub fpr: Vec<f64>,
    /// True positive rate at each threshold
    pub tpr: Vec<f64>,
    /// Decision thresholds (p-value cutoffs)
    pub thresholds: Vec<f64>,
}

/// Mean of several curves resampled onto a shared x grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AveragedCurve {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

/// Fixed threshold break points: 0, a 1000-point logarithmic sweep of
/// [1e-70, 0.1], a 1000-point linear sweep of [0.1, 1], and 1.1 as an
/// explicit right-open endpoint admitting every p-value.
/// numpy equivalent: unique(r_[0, logspace(-70, -1, 1000), linspace(0.1, 1, 1000), 1.1])
fn threshold_grid() -> Vec<f64> {
    let mut grid = Vec::with_capacity(2002);
    grid.push(0.0);
    for i in 0..1000 {
        grid.push(10f64.powf(-70.0 + 69.0 * i as f64 / 999.0));
    }
    for i in 0..1000 {
        grid.push(0.1 + 0.9 * i as f64 / 999.0);
    }
    grid.push(1.1);

    grid.sort_by(|a, b| a.partial_cmp(b).unwrap());
    grid.dedup();
    grid
}

/// Build an ROC curve from binary ground-truth labels and p-values.
///
/// `labels` holds 1 for true positives and 0 for negatives, aligned with
/// `pvalues`. A test is called significant when its p-value falls below
/// the threshold; sweeping the fixed grid yields false/true positive rates
/// per threshold.
///
/// Fails with `InvalidInput` on mismatched lengths, labels outside {0, 1}
/// or missing (NaN) p-values, and with `DegenerateInput` when the labels
/// contain no positives or no negatives (the rates would be undefined).
pub fn pvalue_roc_curve(labels: &[u8], pvalues: &[f64]) -> Result<RocCurve> {
    if labels.len() != pvalues.len() {
        return Err(StatError::InvalidInput {
            reason: format!(
                "labels and p-values have mismatched lengths: {} vs {}",
                labels.len(),
                pvalues.len()
            ),
        });
    }
    if labels.iter().any(|&l| l > 1) {
        return Err(StatError::InvalidInput {
            reason: "labels must be 0 or 1".to_string(),
        });
    }
    if pvalues.iter().any(|p| p.is_nan()) {
        return Err(StatError::InvalidInput {
            reason: "missing (NaN) p-values are not permitted in ROC curves".to_string(),
        });
    }

    let p_total: usize = labels.iter().map(|&l| l as usize).sum();
    let n_total = labels.len() - p_total;
    if p_total == 0 {
        return Err(StatError::DegenerateInput {
            reason: "label vector contains no positive examples".to_string(),
        });
    }
    if n_total == 0 {
        return Err(StatError::DegenerateInput {
            reason: "label vector contains no negative examples".to_string(),
        });
    }

    // Stable argsort by ascending p-value, labels reordered identically
    let mut order: Vec<usize> = (0..pvalues.len()).collect();
    order.sort_by(|&a, &b| pvalues[a].partial_cmp(&pvalues[b]).unwrap());
    let sorted_p: Vec<f64> = order.iter().map(|&i| pvalues[i]).collect();

    // Prefix sums of sorted labels: cum_tp[k] = positives among the k
    // smallest p-values
    let mut cum_tp = Vec::with_capacity(order.len() + 1);
    cum_tp.push(0usize);
    let mut running = 0usize;
    for &i in &order {
        running += labels[i] as usize;
        cum_tp.push(running);
    }

    let grid = threshold_grid();
    debug!(
        "p-value ROC curve: {} observations, {} positives, {} thresholds",
        pvalues.len(),
        p_total,
        grid.len()
    );

    let mut thresholds = Vec::with_capacity(grid.len() + 1);
    let mut tp = Vec::with_capacity(grid.len() + 1);
    let mut fp = Vec::with_capacity(grid.len() + 1);
    for &t in &grid {
        let count = searchsorted_left(&sorted_p, t);
        let tpos = cum_tp[count];
        thresholds.push(t);
        tp.push(tpos);
        fp.push(count - tpos);
    }

    // Sentinel contract (see RocCurve docs): anchor the curve at the
    // origin when the smallest grid threshold already admits a false
    // positive
    if fp[0] != 0 {
        thresholds.insert(0, grid[0] - 1.0);
        tp.insert(0, 0);
        fp.insert(0, 0);
    }

    let tpr = tp.iter().map(|&v| v as f64 / p_total as f64).collect();
    let fpr = fp.iter().map(|&v| v as f64 / n_total as f64).collect();

    Ok(RocCurve {
        fpr,
        tpr,
        thresholds,
    })
}

/// Area under the curve by trapezoidal integration of tpr over fpr.
/// numpy equivalent: trapz(tpr, fpr)
///
/// Points are integrated in the given order; the caller supplies them
/// sorted by ascending fpr.
pub fn auc(fpr: &[f64], tpr: &[f64]) -> Result<f64> {
    if fpr.len() != tpr.len() {
        return Err(StatError::InvalidInput {
            reason: format!(
                "fpr and tpr have mismatched lengths: {} vs {}",
                fpr.len(),
                tpr.len()
            ),
        });
    }
    Ok(trapezoid(tpr, fpr))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_grid_shape() {
        let grid = threshold_grid();

        assert_eq!(grid[0], 0.0);
        assert_eq!(*grid.last().unwrap(), 1.1);
        // 0, two 1000-point sweeps sharing the 0.1 boundary, 1.1
        assert!(grid.len() >= 2000);
        for pair in grid.windows(2) {
            assert!(pair[0] < pair[1], "grid must be strictly increasing");
        }
        // the grid resolves very small p-values logarithmically
        assert!(grid[1] < 1e-69);
    }

    #[test]
    fn test_curve_spans_unit_square() {
        let labels = vec![1, 0, 1, 0];
        let pvalues = vec![0.01, 0.02, 0.5, 0.9];
        let curve = pvalue_roc_curve(&labels, &pvalues).unwrap();

        assert_eq!(curve.fpr.len(), curve.tpr.len());
        assert_eq!(curve.fpr.len(), curve.thresholds.len());

        // threshold 0 admits nothing, threshold 1.1 admits everything
        assert_eq!(curve.fpr[0], 0.0);
        assert_eq!(curve.tpr[0], 0.0);
        assert_eq!(*curve.fpr.last().unwrap(), 1.0);
        assert_eq!(*curve.tpr.last().unwrap(), 1.0);
    }

    #[test]
    fn test_curve_rates_track_admitted_pvalues() {
        // positives at p = 0.01 and 0.5, negatives at 0.02 and 0.9
        let labels = vec![1, 0, 1, 0];
        let pvalues = vec![0.01, 0.02, 0.5, 0.9];
        let curve = pvalue_roc_curve(&labels, &pvalues).unwrap();

        for ((&t, &tpr), &fpr) in curve
            .thresholds
            .iter()
            .zip(curve.tpr.iter())
            .zip(curve.fpr.iter())
        {
            // tpr reaches 1 only once both positives are admitted
            assert_eq!(tpr == 1.0, t > 0.5, "tpr at threshold {}", t);
            // fpr reaches 1 only once both negatives are admitted
            assert_eq!(fpr == 1.0, t > 0.9, "fpr at threshold {}", t);
        }
    }

    #[test]
    fn test_curve_monotone() {
        let labels = vec![1, 1, 0, 1, 0, 0, 1, 0];
        let pvalues = vec![0.001, 0.003, 0.02, 0.04, 0.1, 0.3, 0.45, 0.8];
        let curve = pvalue_roc_curve(&labels, &pvalues).unwrap();

        for pair in curve.fpr.windows(2) {
            assert!(pair[0] <= pair[1]);
        }
        for pair in curve.tpr.windows(2) {
            assert!(pair[0] <= pair[1]);
        }
        for (&fpr, &tpr) in curve.fpr.iter().zip(curve.tpr.iter()) {
            assert!((0.0..=1.0).contains(&fpr));
            assert!((0.0..=1.0).contains(&tpr));
        }
    }

    #[test]
    fn test_degenerate_labels() {
        let pvalues = vec![0.1, 0.2, 0.3];
        assert!(matches!(
            pvalue_roc_curve(&[1, 1, 1], &pvalues),
            Err(StatError::DegenerateInput { .. })
        ));
        assert!(matches!(
            pvalue_roc_curve(&[0, 0, 0], &pvalues),
            Err(StatError::DegenerateInput { .. })
        ));
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(matches!(
            pvalue_roc_curve(&[1, 0], &[0.1]),
            Err(StatError::InvalidInput { .. })
        ));
        assert!(matches!(
            pvalue_roc_curve(&[1, 2], &[0.1, 0.2]),
            Err(StatError::InvalidInput { .. })
        ));
        assert!(matches!(
            pvalue_roc_curve(&[1, 0], &[0.1, f64::NAN]),
            Err(StatError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_auc_diagonal() {
        // no-discrimination line
        let value = auc(&[0.0, 1.0], &[0.0, 1.0]).unwrap();
        assert!((value - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_auc_perfect() {
        let value = auc(&[0.0, 0.0, 1.0], &[0.0, 1.0, 1.0]).unwrap();
        assert!((value - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_auc_length_mismatch() {
        assert!(matches!(
            auc(&[0.0, 1.0], &[0.0]),
            Err(StatError::InvalidInput { .. })
        ));
    }
}
