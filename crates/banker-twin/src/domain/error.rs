//! Domain Error Types
//!
//! Only structurally invalid input is an error. A run that finds no safe
//! completion order is a normal result and lives in
//! [`Outcome`](super::session::Outcome), never here.

use std::fmt;

use super::types::{ProcessId, ResourceVector};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Simulation Errors
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Which shape check failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    /// Allocation and max have different row counts
    ProcessCount,
    /// An allocation row does not have length N
    AllocationRow(ProcessId),
    /// A max row does not match its allocation row
    MaxRow(ProcessId),
    /// An arrival vector does not have length N
    Arrival {
        /// Iteration the arrival was pulled at
        iteration: u64,
        /// Position within the arrival batch
        index: usize,
    },
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ProcessCount => write!(f, "process count"),
            Self::AllocationRow(p) => write!(f, "allocation row of {}", p),
            Self::MaxRow(p) => write!(f, "max row of {}", p),
            Self::Arrival { iteration, index } => {
                write!(f, "arrival #{} at T{}", index, iteration)
            }
        }
    }
}

/// Errors that fail a run before (or instead of) producing an outcome
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SimulationError {
    /// Row counts or row lengths are inconsistent
    #[error("Dimension mismatch in {what}: expected {expected}, found {found}")]
    DimensionMismatch {
        /// The shape that was checked
        what: Dimension,
        /// Expected length
        expected: usize,
        /// Actual length
        found: usize,
    },

    /// `max[i][j] < allocation[i][j]`
    #[error("Negative need for {process} on resource {resource}: max {max} < allocation {allocation}")]
    NegativeNeed {
        /// Offending process
        process: ProcessId,
        /// Offending resource column
        resource: usize,
        /// Declared maximum
        max: u32,
        /// Current allocation
        allocation: u32,
    },

    /// `available + Σ allocation` does not fit in `u32`
    #[error("Total capacity of resource {resource} overflows")]
    CapacityOverflow {
        /// Offending resource column
        resource: usize,
    },

    /// The dynamic run did not settle within the configured bound
    #[error("Iteration limit of {limit} reached before the run settled")]
    IterationLimitExceeded {
        /// Configured bound
        limit: u64,
    },
}

impl SimulationError {
    /// Check if the error comes from malformed input
    ///
    /// # Returns
    ///
    /// `false` only for the iteration bound, which is a property of the
    /// arrival source rather than of the matrices.
    pub fn is_validation(&self) -> bool {
        !matches!(self, Self::IterationLimitExceeded { .. })
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Replay Errors
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Reasons a sequence or trace fails replay
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReplayError {
    /// The snapshot itself is malformed
    #[error(transparent)]
    Invalid(#[from] SimulationError),

    /// Sequence names a process that does not exist
    #[error("{process} is out of range for {processes} processes")]
    UnknownProcess {
        /// Offending entry
        process: ProcessId,
        /// Number of processes in the snapshot
        processes: usize,
    },

    /// Sequence names a process twice
    #[error("{process} is scheduled more than once")]
    Duplicate {
        /// Offending entry
        process: ProcessId,
    },

    /// Process scheduled while its need exceeded the work vector
    #[error("{process} needs {need:?} but only {work:?} is available")]
    InsufficientWork {
        /// Offending entry
        process: ProcessId,
        /// Its need row
        need: ResourceVector,
        /// Work vector at that moment
        work: ResourceVector,
    },

    /// Sequence does not cover every process
    #[error("Sequence covers {covered} of {processes} processes")]
    Incomplete {
        /// Processes in the sequence
        covered: usize,
        /// Processes in the snapshot
        processes: usize,
    },

    /// Available vector in a trace changed without a matching execution
    #[error("Trace record {index} does not follow from record {}", .index - 1)]
    TraceDiscontinuity {
        /// Index of the first inconsistent record
        index: usize,
    },
}
