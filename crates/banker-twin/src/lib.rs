//! Banker Digital Twin Simulator
//!
//! # Overview
//!
//! `banker-twin` is a deterministic simulator of the Banker's deadlock
//! avoidance algorithm. It answers whether a resource-allocation snapshot
//! is safe, produces the completion order that proves it, and keeps a
//! step-by-step trace of every intermediate matrix state for replay.
//!
//! # Trinity Architecture
//!
//! - **Domain**: the algorithms, their state and their trace
//! - **Infrastructure**: JSON input loading
//!
//! # Laws (Invariants)
//!
//! ## Safety Laws
//! - Every process in a safe sequence had `need <= work` when it ran
//! - Replaying a safe sequence ends at `available + Σ allocation`
//! - `need` always equals `max - allocation` and is never negative
//!
//! ## Determinism Laws
//! - Equal input (and arrival events) give equal sequence and counters
//! - Ties within a pass go to the lowest process index
//!
//! ## Trace Laws
//! - Records are append-only and ordered
//! - `available` never decreases across the records of a run
//! - Comparisons grow by exactly N per process tested
//!
//! # Usage
//!
//! ```rust
//! use banker_twin::{check_safety, ProcessId};
//!
//! let allocation = vec![vec![0, 1, 0], vec![2, 0, 0], vec![3, 0, 2], vec![2, 1, 1]];
//! let max = vec![vec![7, 5, 3], vec![3, 2, 2], vec![9, 0, 2], vec![2, 2, 2]];
//!
//! let sequence = check_safety(&allocation, &max, &[3, 3, 2]).unwrap();
//! assert_eq!(
//!     sequence,
//!     Some(vec![ProcessId(1), ProcessId(3), ProcessId(0), ProcessId(2)])
//! );
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

// Trinity Architecture Layers
pub mod domain;
pub mod infrastructure;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Re-export Primary Types
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

// State types
pub use domain::{
    Matrix,
    ProcessId,
    ResourceVector,
    SafeSequence,
    SimulationInput,
    SystemState,
};

// Errors
pub use domain::{Dimension, ReplayError, SimulationError};

// Algorithms
pub use domain::{
    check_safety,
    check_trace,
    compute_need,
    run_dynamic,
    verify_safe_sequence,
    DynamicScheduler,
    SafetyChecker,
};

// Arrivals
pub use domain::{
    parse_schedule,
    Arrival,
    ArrivalSchedule,
    ArrivalSource,
    NoArrivals,
    QueuedArrivals,
    ScheduledArrivals,
};

// Sessions
pub use domain::{
    Metrics,
    Outcome,
    SimulationConfig,
    SimulationMode,
    SimulationSession,
    Simulator,
    SimulatorBuilder,
    StepRecord,
    StepTag,
};

// Input loading
pub use infrastructure::{load_input, parse_input, sample_input};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_defined() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_primary_types_exported() {
        let _pid = ProcessId::new(0);
        let _config = SimulationConfig::default();
        let _mode = SimulationMode::Dynamic;
        let _source = NoArrivals;
    }

    #[test]
    fn test_sample_runs_end_to_end() {
        let session = Simulator::default().run_standard(&sample_input()).unwrap();
        assert!(session.is_safe());
        assert!(check_trace(session.steps()).is_ok());
    }
}
