//! Error types for control law construction.

use thiserror::Error;

/// Result type for control operations.
pub type ControlResult<T> = Result<T, ControlError>;

/// Errors that can occur while building a controller or actuator.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ControlError {
    /// Invalid argument provided to a control function.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// Numeric input that is NaN or infinite.
    #[error("Non-finite control parameter: {0}")]
    NonFinite(#[from] gk_core::CoreError),
}
