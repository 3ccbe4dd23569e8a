//! Shared numeric utilities on sorted slices
//!
//! Small helpers used by both the FDR adjustment and the ROC curve module:
//! running minimum, numpy-style searchsorted, and trapezoidal integration.

/// Cumulative (running) minimum over a slice.
/// numpy equivalent: the cummin() helper backing fdr()
///
/// NaN entries are skipped by `f64::min`: the running minimum keeps its
/// previous value past them (except for a leading NaN, which is emitted
/// as-is until the first number appears).
pub fn cummin(x: &[f64]) -> Vec<f64> {
    let mut result = Vec::with_capacity(x.len());
    if let Some((&first, rest)) = x.split_first() {
        let mut running = first;
        result.push(running);
        for &v in rest {
            running = running.min(v);
            result.push(running);
        }
    }
    result
}

/// Index of the first element in `sorted` that is >= `value`.
/// numpy equivalent: searchsorted(sorted, value, side="left")
///
/// Equivalently, the number of elements strictly less than `value`.
pub fn searchsorted_left(sorted: &[f64], value: f64) -> usize {
    sorted.partition_point(|&a| a < value)
}

/// Index of the first element in `sorted` that is > `value`.
/// numpy equivalent: searchsorted(sorted, value, side="right")
pub fn searchsorted_right(sorted: &[f64], value: f64) -> usize {
    sorted.partition_point(|&a| a <= value)
}

/// Trapezoidal integration of `y` over `x`, taken in the given order.
/// numpy equivalent: trapz(y, x)
///
/// The caller supplies the points already ordered along x; segments are not
/// re-sorted, so a descending x contributes negatively, matching numpy.
pub fn trapezoid(y: &[f64], x: &[f64]) -> f64 {
    debug_assert_eq!(y.len(), x.len());
    let mut area = 0.0;
    for i in 1..x.len() {
        area += 0.5 * (y[i] + y[i - 1]) * (x[i] - x[i - 1]);
    }
    area
}
