//! # Step Recorder Module
//!
//! Observability for both checkers. The recorder never influences a
//! scheduling decision; it only watches:
//! - Snapshot before every scan, each arrival, each execution
//! - Comparison counter (exactly N per process tested)
//! - Iteration counter (once per outer pass)
//! - Wall-clock time from run start to completion
//!
//! ## Backends
//!
//! Storage is a [`TraceBackend`] type parameter, so the counting-only
//! configuration never clones a matrix:
//!
//! ```text
//! StepRecorder<VecBackend>   bounded heap trace (FullRecorder)
//! StepRecorder<NullBackend>  counters only      (CountingRecorder)
//! ```
//!
//! The record sequence is the replay log: every intermediate matrix state
//! can be read back from it in order without re-running the algorithm.

pub mod backend;
pub mod metrics;
pub mod record;
pub mod step_recorder;

// Re-exports for ergonomic usage
pub use backend::{NullBackend, RecordError, TraceBackend, VecBackend};
pub use metrics::Metrics;
pub use record::{StepRecord, StepTag};
pub use step_recorder::StepRecorder;

/// Maximum records per trace (default)
pub const DEFAULT_MAX_STEPS: usize = 100_000;

/// Recorder that keeps the full trace (up to its capacity)
pub type FullRecorder = StepRecorder<VecBackend>;

/// Recorder that keeps counters and timing only
pub type CountingRecorder = StepRecorder<NullBackend>;
