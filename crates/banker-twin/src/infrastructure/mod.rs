//! Infrastructure Layer - External Technology Stack
//!
//! Concrete integrations that depend on external formats.
//!
//! # Responsibilities
//! - JSON input records (serde_json)
//! - File access with error context (anyhow)

pub mod input;

// Re-exports
pub use input::{load_input, parse_input, sample_input};
