//! Error handling for driftwatch-store
//!
//! Wraps driftwatch-core DwError with store-specific helpers

use driftwatch_core::errors::{DriftError, DwError, DwErrorKind};

/// Result type alias using DwError
pub type Result<T> = std::result::Result<T, DwError>;

/// Create a state file read error
pub fn io_error(operation: &str, path: &str, err: std::io::Error) -> DwError {
    DwError::from(DriftError::StateFileRead {
        path: path.to_string(),
        reason: err.to_string(),
    })
    .with_op(operation.to_string())
}

/// Create a state file parse error
pub fn state_parse(operation: &str, path: &str, reason: impl Into<String>) -> DwError {
    DwError::from(DriftError::StateFileParse {
        path: path.to_string(),
        reason: reason.into(),
    })
    .with_op(operation.to_string())
}

/// Create an unsupported file type error
pub fn unsupported_format(operation: &str, path: &str) -> DwError {
    DwError::from(DriftError::UnsupportedStateFormat {
        path: path.to_string(),
    })
    .with_op(operation.to_string())
}

/// Create a missing instance error
pub fn instance_not_found(instance_id: &str, source_name: &str) -> DwError {
    DwError::from(DriftError::InstanceNotFound {
        instance_id: instance_id.to_string(),
        source_name: source_name.to_string(),
    })
    .with_op("get_instance")
}

/// Create an invalid instance id error
pub fn invalid_id() -> DwError {
    DwError::new(DwErrorKind::InvalidInput)
        .with_op("get_instance")
        .with_message("instance id must not be empty")
}
