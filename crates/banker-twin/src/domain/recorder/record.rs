//! Step Record Types

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::types::{Matrix, ProcessId, ResourceVector};

/// Phase label of a record
///
/// Displays as `T{k}`, `T{k}.exec` or `T{k}.arrival`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum StepTag {
    /// State before a scan
    Snapshot {
        /// Outer pass index
        iteration: u64,
    },
    /// State right after a process finished
    Execution {
        /// Outer pass index
        iteration: u64,
    },
    /// State right after arrivals were admitted
    Arrival {
        /// Outer pass index
        iteration: u64,
    },
}

impl StepTag {
    /// Outer pass this record belongs to
    pub fn iteration(&self) -> u64 {
        match *self {
            Self::Snapshot { iteration }
            | Self::Execution { iteration }
            | Self::Arrival { iteration } => iteration,
        }
    }
}

impl fmt::Display for StepTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Snapshot { iteration } => write!(f, "T{}", iteration),
            Self::Execution { iteration } => write!(f, "T{}.exec", iteration),
            Self::Arrival { iteration } => write!(f, "T{}.arrival", iteration),
        }
    }
}

/// One immutable entry of the replay log
///
/// In a standard run `available` is the work vector of the search; in a
/// dynamic run it is the live available vector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepRecord {
    /// Phase label
    pub tag: StepTag,
    /// Allocation snapshot
    pub allocation: Matrix,
    /// Max snapshot
    pub max: Matrix,
    /// Need snapshot
    pub need: Matrix,
    /// Available snapshot
    pub available: ResourceVector,
    /// Process that finished at this step
    pub executed: Option<ProcessId>,
    /// Max-demand vectors admitted at this step
    pub arrivals: Option<Vec<ResourceVector>>,
    /// Cumulative comparison count
    pub comparisons_so_far: u64,
}

impl StepRecord {
    /// Number of processes visible in this snapshot
    pub fn num_processes(&self) -> usize {
        self.allocation.len()
    }
}
