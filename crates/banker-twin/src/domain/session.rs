//! Simulation Session
//!
//! The caller-owned result of one run: replay log, metrics and outcome.
//! There is no process-wide state; each run produces its own session.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::recorder::{Metrics, StepRecord, StepRecorder, TraceBackend};
use super::types::{ProcessId, SafeSequence};

/// Which checker produced a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimulationMode {
    /// Static safety check over one snapshot
    Standard,
    /// Iterated check with arrivals
    Dynamic,
}

impl fmt::Display for SimulationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Standard => write!(f, "standard"),
            Self::Dynamic => write!(f, "dynamic"),
        }
    }
}

/// How a well-formed run ended
///
/// `Unsafe` and `Stuck` are results, not errors: the input was valid but no
/// safe completion order exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// Every process finished
    Safe {
        /// Completion order
        sequence: SafeSequence,
    },
    /// Static check found no completion order
    Unsafe {
        /// Processes that could finish before the search stalled
        partial: SafeSequence,
        /// Processes that never became runnable
        blocked: Vec<ProcessId>,
    },
    /// Dynamic run made no progress with no arrival pending
    Stuck {
        /// Iteration of the zero-progress pass
        iteration: u64,
        /// Processes that finished before the run got stuck
        partial: SafeSequence,
        /// Processes still waiting
        blocked: Vec<ProcessId>,
    },
}

impl Outcome {
    /// Check if a safe sequence was found
    pub fn is_safe(&self) -> bool {
        matches!(self, Self::Safe { .. })
    }

    /// The safe sequence, if any
    pub fn safe_sequence(&self) -> Option<&SafeSequence> {
        match self {
            Self::Safe { sequence } => Some(sequence),
            _ => None,
        }
    }

    /// Consume into the safe sequence, if any
    pub fn into_safe_sequence(self) -> Option<SafeSequence> {
        match self {
            Self::Safe { sequence } => Some(sequence),
            _ => None,
        }
    }

    /// Processes that never finished
    pub fn blocked(&self) -> &[ProcessId] {
        match self {
            Self::Safe { .. } => &[],
            Self::Unsafe { blocked, .. } | Self::Stuck { blocked, .. } => blocked.as_slice(),
        }
    }
}

/// Result of one run, owned by the caller
#[derive(Debug, Clone, Serialize)]
pub struct SimulationSession {
    mode: SimulationMode,
    steps: Vec<StepRecord>,
    metrics: Metrics,
    outcome: Outcome,
    truncated: bool,
}

impl SimulationSession {
    /// Finalize a recorder into a session
    pub fn from_recorder<B: TraceBackend>(
        mode: SimulationMode,
        recorder: StepRecorder<B>,
        outcome: Outcome,
    ) -> Self {
        let (steps, metrics, truncated) = recorder.finish();
        Self {
            mode,
            steps,
            metrics,
            outcome,
            truncated,
        }
    }

    /// Checker that produced this session
    pub fn mode(&self) -> SimulationMode {
        self.mode
    }

    /// Replay log in append order
    pub fn steps(&self) -> &[StepRecord] {
        &self.steps
    }

    /// Run-level metrics
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// How the run ended
    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    /// Whether the trace hit its capacity
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// Check if a safe sequence was found
    pub fn is_safe(&self) -> bool {
        self.outcome.is_safe()
    }

    /// The safe sequence, if any
    pub fn safe_sequence(&self) -> Option<&SafeSequence> {
        self.outcome.safe_sequence()
    }

    /// Available vector of every record, in order
    pub fn available_history(&self) -> impl Iterator<Item = &[u32]> + '_ {
        self.steps.iter().map(|step| step.available.as_slice())
    }

    /// Processes in the order their execution records appear
    pub fn executions(&self) -> impl Iterator<Item = ProcessId> + '_ {
        self.steps.iter().filter_map(|step| step.executed)
    }

    /// Consume into `(steps, metrics, outcome)`
    pub fn into_parts(self) -> (Vec<StepRecord>, Metrics, Outcome) {
        (self.steps, self.metrics, self.outcome)
    }
}
