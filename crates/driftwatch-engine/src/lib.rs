//! driftwatch Engine - orchestration layer
//!
//! Provides the bounded concurrent batch evaluator, its cancellation
//! context, the TOML configuration layer, and the drift service that wires
//! state sources to the detector.

pub mod batch;
pub mod cancel;
pub mod config;
pub mod errors;
pub mod pool;
pub mod service;

pub use batch::BatchEvaluator;
pub use cancel::ExecutionContext;
pub use config::{default_concurrency, resolve_concurrency, DriftConfig};
pub use pool::{JobOutcome, WorkerPool};
pub use service::DriftService;
