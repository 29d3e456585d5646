//! Canonical schema constants for structured logging and events
//!
//! These constants keep field names consistent between the detector, the
//! batch evaluator and the CLI.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_RUN_ID: &str = "run_id";

// Entity identifiers
pub const FIELD_INSTANCE_ID: &str = "instance_id";
pub const FIELD_ATTRIBUTE: &str = "attribute";
pub const FIELD_SOURCE: &str = "source";

// Batch counters
pub const FIELD_TOTAL: &str = "total";
pub const FIELD_DRIFTED: &str = "drifted";
pub const FIELD_CONCURRENCY: &str = "concurrency";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
pub const EVENT_DRIFT_DETECTED: &str = "drift_detected";
