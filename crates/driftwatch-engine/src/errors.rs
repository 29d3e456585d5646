//! Error helpers for driftwatch-engine

use driftwatch_core::errors::{DriftError, DwError, DwErrorKind};

/// Result type alias using DwError
pub type Result<T> = std::result::Result<T, DwError>;

/// Create a configuration error
pub fn config_invalid(operation: &str, reason: impl Into<String>) -> DwError {
    DwError::from(DriftError::InvalidConfig {
        reason: reason.into(),
    })
    .with_op(operation.to_string())
}

/// Create an invalid input error
pub fn invalid_input(operation: &str, message: impl Into<String>) -> DwError {
    DwError::new(DwErrorKind::InvalidInput)
        .with_op(operation.to_string())
        .with_message(message)
}
