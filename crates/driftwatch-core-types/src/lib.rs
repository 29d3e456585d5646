//! Core types shared across driftwatch facilities
//!
//! This crate provides foundational types used by both the error and
//! logging facilities as well as the batch evaluator:
//!
//! - **Correlation types**: RunId
//! - **Schema constants**: Canonical field keys and event names

pub mod correlation;
pub mod schema;

pub use correlation::RunId;
