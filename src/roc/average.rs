//! Averaging of ROC-derived curves across repeated trials
//!
//! Each trial produces one step-function curve; the routines here resample
//! every curve onto the union of the observed break points by linear
//! interpolation and average pointwise. Averaging only happens where the
//! curves overlap: evaluating past a curve's own domain is an error.

use log::debug;

use super::interp::Interp1d;
use super::{AveragedCurve, RocCurve};
use crate::error::{Result, StatError};
use crate::stats::searchsorted_right;

/// Average ROC curves (x = false positive rate, y = true positive rate).
///
/// A step-function curve can carry several tpr values for one fpr value;
/// each curve is first collapsed to the largest tpr per unique fpr. The
/// collapsed curves are interpolated on the union of all fpr break points
/// and averaged; if the mean curve does not start at zero it is anchored
/// with an explicit (0, 0) point.
pub fn average_roc_curves(curves: &[RocCurve]) -> Result<AveragedCurve> {
    if curves.is_empty() {
        return Err(StatError::InvalidInput {
            reason: "no curves to average".to_string(),
        });
    }

    let mut funcs = Vec::with_capacity(curves.len());
    let mut grid: Vec<f64> = Vec::new();

    for curve in curves {
        // Largest tpr for each unique fpr: fpr is sorted ascending and
        // tpr is non-decreasing, so the last occurrence carries the
        // maximum
        let mut fpr_u = Vec::new();
        let mut tpr_u = Vec::new();
        let mut k = 0;
        while k < curve.fpr.len() {
            let last = searchsorted_right(&curve.fpr, curve.fpr[k]) - 1;
            fpr_u.push(curve.fpr[last]);
            tpr_u.push(curve.tpr[last]);
            k = last + 1;
        }

        grid.extend_from_slice(&fpr_u);
        funcs.push(Interp1d::new(fpr_u, tpr_u)?);
    }

    sort_unique(&mut grid);
    debug!(
        "averaging {} ROC curves over {} fpr break points",
        curves.len(),
        grid.len()
    );

    let mut y = Vec::with_capacity(grid.len());
    for &xq in &grid {
        let mut sum = 0.0;
        for f in &funcs {
            sum += f.eval(xq)?;
        }
        y.push(sum / funcs.len() as f64);
    }

    let mut x = grid;
    if y[0] > 0.0 {
        x.insert(0, 0.0);
        y.insert(0, 0.0);
    }

    Ok(AveragedCurve { x, y })
}

/// Average calibration curves (x = threshold, y = observed fpr).
pub fn average_calibration_curves(curves: &[RocCurve]) -> Result<AveragedCurve> {
    average_by_threshold(curves, |c| c.fpr.as_slice())
}

/// Average sensitivity curves (x = threshold, y = observed tpr).
pub fn average_sensitivity_curves(curves: &[RocCurve]) -> Result<AveragedCurve> {
    average_by_threshold(curves, |c| c.tpr.as_slice())
}

/// Shared procedure for the two threshold-keyed variants: repair every
/// curve's boundaries, interpolate rate as a function of threshold on the
/// union of all thresholds at most 1, and average pointwise.
fn average_by_threshold(
    curves: &[RocCurve],
    rate: fn(&RocCurve) -> &[f64],
) -> Result<AveragedCurve> {
    if curves.is_empty() {
        return Err(StatError::InvalidInput {
            reason: "no curves to average".to_string(),
        });
    }

    let mut funcs = Vec::with_capacity(curves.len());
    let mut grid: Vec<f64> = Vec::new();

    for curve in curves {
        let f = repair_threshold_curve(&curve.thresholds, rate(curve))?;
        grid.extend_from_slice(f.xs());
        funcs.push(f);
    }

    sort_unique(&mut grid);
    grid.retain(|&t| t <= 1.0);
    debug!(
        "averaging {} threshold-keyed curves over {} break points",
        curves.len(),
        grid.len()
    );

    let mut y = Vec::with_capacity(grid.len());
    for &xq in &grid {
        let mut sum = 0.0;
        for f in &funcs {
            sum += f.eval(xq)?;
        }
        y.push(sum / funcs.len() as f64);
    }

    Ok(AveragedCurve { x: grid, y })
}

/// Make a (threshold, rate) curve defined on the whole averaging domain.
///
/// Every curve gets an explicit right boundary (1, 1): at threshold 1 all
/// tests are admitted, so both rates are 1. On the left, a leading
/// negative threshold is the builder's below-range sentinel (see
/// [`RocCurve`]) and is dropped; if the smallest remaining threshold is
/// still positive, an explicit (0, 0) anchor is prepended.
fn repair_threshold_curve(thresholds: &[f64], rates: &[f64]) -> Result<Interp1d> {
    let mut ts = thresholds.to_vec();
    let mut rs = rates.to_vec();

    ts.push(1.0);
    rs.push(1.0);

    if ts[0] < 0.0 {
        ts.remove(0);
        rs.remove(0);
    }
    if ts[0] > 0.0 {
        ts.insert(0, 0.0);
        rs.insert(0, 0.0);
    }

    Interp1d::new(ts, rs)
}

fn sort_unique(values: &mut Vec<f64>) {
    values.sort_by(|a, b| a.partial_cmp(b).unwrap());
    values.dedup();
}
