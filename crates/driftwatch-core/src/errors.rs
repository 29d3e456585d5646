use thiserror::Error;

/// Result type alias using DriftError
pub type Result<T> = std::result::Result<T, DriftError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Every error surfaced by driftwatch maps onto one of these kinds, and every
/// kind carries a stable `ERR_*` code that tests, log pipelines and the CLI
/// can match on without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DwErrorKind {
    // Attribute paths
    /// Attribute path has no segments (or an empty tag key)
    InvalidPath,
    /// First path segment, or a root volume sub-field, is not recognized
    UnknownAttribute,

    // Per-instance batch outcomes
    /// Instance exists in actual state but is not declared
    NotFoundInDesiredState,
    /// Evaluation was skipped because the execution context was canceled
    Canceled,
    /// The worker task evaluating an instance did not complete
    TaskFailed,

    // State sources
    /// Requested instance id is absent from a state source
    NotFound,
    /// A state file could not be read
    Io,
    /// A state file could not be decoded into instance records
    StateParse,
    /// A state file has an extension no loader understands
    UnsupportedFormat,

    // Configuration
    InvalidConfig,
    InvalidInput,

    // Internal
    Internal,
}

impl DwErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            DwErrorKind::InvalidPath => "ERR_INVALID_PATH",
            DwErrorKind::UnknownAttribute => "ERR_UNKNOWN_ATTRIBUTE",
            DwErrorKind::NotFoundInDesiredState => "ERR_NOT_FOUND_IN_DESIRED_STATE",
            DwErrorKind::Canceled => "ERR_CANCELED",
            DwErrorKind::TaskFailed => "ERR_TASK_FAILED",
            DwErrorKind::NotFound => "ERR_NOT_FOUND",
            DwErrorKind::Io => "ERR_IO",
            DwErrorKind::StateParse => "ERR_STATE_PARSE",
            DwErrorKind::UnsupportedFormat => "ERR_UNSUPPORTED_FORMAT",
            DwErrorKind::InvalidConfig => "ERR_INVALID_CONFIG",
            DwErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            DwErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries a kind for programmatic handling plus optional context (the
/// operation, the instance and attribute involved) for diagnostics.
#[derive(Debug, Clone)]
pub struct DwError {
    kind: DwErrorKind,
    op: Option<String>,
    instance_id: Option<String>,
    attribute: Option<String>,
    path: Option<String>,
    message: String,
    source: Option<Box<DwError>>,
}

impl DwError {
    /// Create a new error with the specified kind
    pub fn new(kind: DwErrorKind) -> Self {
        Self {
            kind,
            op: None,
            instance_id: None,
            attribute: None,
            path: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add instance ID context
    pub fn with_instance_id(mut self, id: impl Into<String>) -> Self {
        self.instance_id = Some(id.into());
        self
    }

    /// Add attribute path context
    pub fn with_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attribute = Some(attribute.into());
        self
    }

    /// Add file path context
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: DwError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn kind(&self) -> DwErrorKind {
        self.kind
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn instance_id(&self) -> Option<&str> {
        self.instance_id.as_deref()
    }

    pub fn attribute(&self) -> Option<&str> {
        self.attribute.as_deref()
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error, if any
    pub fn source_error(&self) -> Option<&DwError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for DwError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(instance_id) = &self.instance_id {
            write!(f, " (instance_id: {})", instance_id)?;
        }
        if let Some(attribute) = &self.attribute {
            write!(f, " (attribute: {})", attribute)?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path)?;
        }
        if let Some(source) = &self.source {
            write!(f, " caused by {}", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for DwError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Error taxonomy for drift detection
///
/// The `Display` text of the per-instance variants is exactly what ends up
/// in [`crate::SingleResult::error`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DriftError {
    // ===== Attribute Paths =====
    /// Attribute path has no segments
    #[error("invalid attribute path: {reason}")]
    InvalidPath { reason: String },

    /// Attribute path names a field the record does not have
    #[error("unknown attribute: {attribute}")]
    UnknownAttribute { attribute: String },

    // ===== Batch Outcomes =====
    /// Instance observed in actual state has no declared counterpart
    #[error("instance not found in desired state")]
    NotFoundInDesiredState { instance_id: String },

    /// Evaluation did not run because the context was canceled
    #[error("context canceled")]
    Canceled { instance_id: String },

    /// Worker task for an instance did not produce a result
    #[error("evaluation task failed: {reason}")]
    TaskFailed { instance_id: String, reason: String },

    // ===== State Sources =====
    /// Instance id absent from a named state source
    #[error("instance {instance_id} not found in {source_name}")]
    InstanceNotFound {
        instance_id: String,
        source_name: String,
    },

    #[error("failed to read state file {path}: {reason}")]
    StateFileRead { path: String, reason: String },

    #[error("failed to parse state file {path}: {reason}")]
    StateFileParse { path: String, reason: String },

    #[error("unsupported state file type: {path}")]
    UnsupportedStateFormat { path: String },

    // ===== Configuration =====
    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },
}

impl From<DriftError> for DwError {
    fn from(err: DriftError) -> Self {
        let message = err.to_string();
        match err {
            DriftError::InvalidPath { .. } => DwError::new(DwErrorKind::InvalidPath),
            DriftError::UnknownAttribute { attribute } => {
                DwError::new(DwErrorKind::UnknownAttribute).with_attribute(attribute)
            }
            DriftError::NotFoundInDesiredState { instance_id } => {
                DwError::new(DwErrorKind::NotFoundInDesiredState).with_instance_id(instance_id)
            }
            DriftError::Canceled { instance_id } => {
                DwError::new(DwErrorKind::Canceled).with_instance_id(instance_id)
            }
            DriftError::TaskFailed { instance_id, .. } => {
                DwError::new(DwErrorKind::TaskFailed).with_instance_id(instance_id)
            }
            DriftError::InstanceNotFound { instance_id, .. } => {
                DwError::new(DwErrorKind::NotFound).with_instance_id(instance_id)
            }
            DriftError::StateFileRead { path, .. } => {
                DwError::new(DwErrorKind::Io).with_path(path)
            }
            DriftError::StateFileParse { path, .. } => {
                DwError::new(DwErrorKind::StateParse).with_path(path)
            }
            DriftError::UnsupportedStateFormat { path } => {
                DwError::new(DwErrorKind::UnsupportedFormat).with_path(path)
            }
            DriftError::InvalidConfig { .. } => DwError::new(DwErrorKind::InvalidConfig),
        }
        .with_message(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_error_messages_are_stable() {
        let not_found = DriftError::NotFoundInDesiredState {
            instance_id: "i-1".to_string(),
        };
        let canceled = DriftError::Canceled {
            instance_id: "i-1".to_string(),
        };
        assert_eq!(not_found.to_string(), "instance not found in desired state");
        assert_eq!(canceled.to_string(), "context canceled");
    }

    #[test]
    fn test_display_includes_code_and_context() {
        let err = DwError::new(DwErrorKind::StateParse)
            .with_op("load_state")
            .with_path("prod.tfstate")
            .with_message("expected value at line 1");
        let text = err.to_string();
        assert!(text.starts_with("[ERR_STATE_PARSE]"));
        assert!(text.contains("load_state"));
        assert!(text.contains("prod.tfstate"));
    }

    #[test]
    fn test_source_chain_is_exposed() {
        let inner = DwError::new(DwErrorKind::Io).with_message("permission denied");
        let outer = DwError::new(DwErrorKind::StateParse).with_source(inner);
        assert_eq!(
            outer.source_error().map(|e| e.kind()),
            Some(DwErrorKind::Io)
        );
        assert!(std::error::Error::source(&outer).is_some());
    }
}
