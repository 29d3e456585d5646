//! driftwatch Store - instance state sources
//!
//! Provides:
//! - The `InstanceSource` trait both sides of a comparison are loaded through
//! - Terraform JSON state and HCL configuration loading (declared/desired state)
//! - Observed-state snapshots of normalized records in JSON or YAML

mod cache;
pub mod errors;
pub mod snapshot;
pub mod source;
pub mod terraform;

// Re-export key types
pub use errors::Result;
pub use snapshot::{load_snapshot_file, parse_snapshot, SnapshotFormat, SnapshotSource};
pub use source::InstanceSource;
pub use terraform::TerraformStateSource;
