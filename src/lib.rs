//! pvstats: FDR adjustment and p-value ROC curve utilities
//!
//! Numeric helpers supporting mutation analysis notebooks: false discovery
//! rate adjustment of p-values, p-value-threshold ROC curves for labeled
//! benchmarks, and averaging of ROC / calibration / sensitivity curves
//! across repeated trials. Everything is a pure function over caller
//! supplied slices; outputs are plain vectors for a plotting or reporting
//! layer to consume.
//!
//! # Example
//!
//! ```ignore
//! use pvstats::prelude::*;
//!
//! // One curve per simulated trial
//! let curves: Vec<RocCurve> = trials
//!     .iter()
//!     .map(|t| pvalue_roc_curve(&t.labels, &t.pvalues))
//!     .collect::<Result<_>>()?;
//!
//! let mean_roc = average_roc_curves(&curves)?;
//! let area = auc(&mean_roc.x, &mean_roc.y)?;
//!
//! // q-values for a single screen
//! let qvalues = fdr(&pvalues, 1.0)?;
//! ```

pub mod error;
pub mod fdr;
pub mod roc;
pub mod stats;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Result, StatError};
    pub use crate::fdr::fdr;
    pub use crate::roc::{
        auc, average_calibration_curves, average_roc_curves, average_sensitivity_curves,
        pvalue_roc_curve, AveragedCurve, RocCurve,
    };
    pub use crate::stats::cummin;
}
