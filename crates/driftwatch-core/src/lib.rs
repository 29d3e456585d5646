//! driftwatch Core - drift detection kernel
//!
//! This crate provides the pure, synchronous half of the drift scanner:
//! - Normalized instance records and the drift result/report model
//! - The attribute registry (which dotted paths are comparable)
//! - Path-based value extraction against an instance record
//! - Type-aware equality (order-insensitive lists, maps, structural fallback)
//! - The single-instance detector
//! - Report rendering (text, table, JSON, compact)
//! - Error and logging facilities shared by the outer crates
//!
//! Concurrency, cancellation and I/O live in `driftwatch-engine` and
//! `driftwatch-store`.

pub mod compare;
pub mod detector;
pub mod errors;
pub mod extract;
pub mod logging_facility;
pub mod model;
pub mod registry;
pub mod render;
pub mod value;

/// Re-exported so the logging macros resolve schema constants through `$crate`.
pub use driftwatch_core_types as core_types;

// Re-export commonly used types
pub use compare::values_equal;
pub use detector::Detector;
pub use errors::{DriftError, DwError, DwErrorKind, Result};
pub use extract::{extract, extract_value};
pub use model::{
    BlockDevice, DriftReport, DriftedAttribute, InstanceMap, InstanceRecord, SingleResult,
};
pub use registry::{
    supported_attributes, AttributePath, BlockDeviceField, InstanceField, DEFAULT_ATTRIBUTES,
};
pub use render::{render_report, render_single, OutputFormat};
pub use value::AttributeValue;
