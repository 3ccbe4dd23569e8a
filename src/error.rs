//! Error types for pvstats

use thiserror::Error;

/// Main error type for FDR adjustment and ROC curve operations
#[derive(Error, Debug)]
pub enum StatError {
    #[error("Invalid parameter: {reason}")]
    InvalidParameter { reason: String },

    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("Degenerate input: {reason}")]
    DegenerateInput { reason: String },

    #[error("Value {value} outside interpolation domain [{min}, {max}]")]
    DomainError { value: f64, min: f64, max: f64 },
}

/// Result type alias for pvstats operations
pub type Result<T> = std::result::Result<T, StatError>;
