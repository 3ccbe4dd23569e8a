//! Piecewise-linear interpolation with explicit domain checking

use crate::error::{Result, StatError};

/// Linear interpolant over a set of (x, y) knots.
///
/// Knots are sorted by x on construction (stable, so duplicate x values
/// keep their given order). Evaluation at an exact knot returns the first
/// matching knot's y, which keeps curves with duplicated boundary knots
/// well-defined. Evaluation outside [x_min, x_max] is an error: averaging
/// is only meaningful where curves overlap, so there is no extrapolation.
pub(crate) struct Interp1d {
    x: Vec<f64>,
    y: Vec<f64>,
}

impl Interp1d {
    pub(crate) fn new(x: Vec<f64>, y: Vec<f64>) -> Result<Self> {
        if x.len() != y.len() {
            return Err(StatError::InvalidInput {
                reason: format!(
                    "interpolation knots have mismatched lengths: {} x values, {} y values",
                    x.len(),
                    y.len()
                ),
            });
        }
        if x.len() < 2 {
            return Err(StatError::InvalidInput {
                reason: format!("interpolation needs at least 2 knots, got {}", x.len()),
            });
        }
        if x.iter().any(|v| v.is_nan()) || y.iter().any(|v| v.is_nan()) {
            return Err(StatError::InvalidInput {
                reason: "interpolation knots contain NaN".to_string(),
            });
        }

        let mut pairs: Vec<(f64, f64)> = x.into_iter().zip(y).collect();
        pairs.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap());

        let (x, y) = pairs.into_iter().unzip();
        Ok(Interp1d { x, y })
    }

    /// The sorted x knots.
    pub(crate) fn xs(&self) -> &[f64] {
        &self.x
    }

    pub(crate) fn eval(&self, xq: f64) -> Result<f64> {
        let n = self.x.len();
        let (min, max) = (self.x[0], self.x[n - 1]);
        if xq.is_nan() || xq < min || xq > max {
            return Err(StatError::DomainError {
                value: xq,
                min,
                max,
            });
        }

        // First knot with x >= xq; exists because xq <= max
        let idx = self.x.partition_point(|&a| a < xq);
        if self.x[idx] == xq {
            return Ok(self.y[idx]);
        }

        // xq lies strictly between x[idx-1] and x[idx]
        let (x0, x1) = (self.x[idx - 1], self.x[idx]);
        let t = (xq - x0) / (x1 - x0);
        Ok(self.y[idx - 1] + t * (self.y[idx] - self.y[idx - 1]))
    }
}
