//! Domain Layer - Banker's Algorithm Assembly
//!
//! # Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Domain Layer                             │
//! ├─────────────────────────────────────────────────────────────┤
//! │                                                             │
//! │  Types / Need                  Arrivals                     │
//! │  ├─ SystemState                ├─ ArrivalSource             │
//! │  ├─ SimulationInput            ├─ ScheduledArrivals         │
//! │  └─ compute_need / validate    └─ parse_schedule            │
//! │                                                             │
//! │  Checkers                      Recorder                     │
//! │  ├─ SafetyChecker<B>           ├─ StepRecorder<B>           │
//! │  └─ DynamicScheduler<B>        ├─ VecBackend / NullBackend  │
//! │                                └─ Metrics                   │
//! │                                                             │
//! │  Simulation                    Replay                       │
//! │  ├─ Simulator                  ├─ verify_safe_sequence      │
//! │  └─ SimulationSession          └─ check_trace               │
//! │                                                             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Backends
//!
//! Both checkers are generic over the recorder backend. The plain functions
//! [`check_safety`] and [`run_dynamic`] use [`NullBackend`] and never build
//! a snapshot; [`Simulator`] keeps the full trace unless configured not to.
//!
//! ```rust
//! use banker_twin::domain::*;
//!
//! let input = SimulationInput::new(
//!     vec![3, 3, 2],
//!     vec![vec![0, 1, 0], vec![2, 0, 0], vec![3, 0, 2], vec![2, 1, 1]],
//!     vec![vec![7, 5, 3], vec![3, 2, 2], vec![9, 0, 2], vec![2, 2, 2]],
//! );
//!
//! let mut arrivals = ScheduledArrivals::new(parse_schedule("1:4,3,3"));
//! let session = Simulator::default().run_dynamic(&input, &mut arrivals).unwrap();
//!
//! assert_eq!(session.safe_sequence().map(|s| s.len()), Some(5));
//! assert!(check_trace(session.steps()).is_ok());
//! ```

pub mod arrivals;
pub mod dynamic;
pub mod error;
pub mod need;
pub mod recorder;
pub mod replay;
pub mod safety;
pub mod session;
pub mod simulation;
pub mod types;

// Core types
pub use error::{Dimension, ReplayError, SimulationError};
pub use types::{Matrix, ProcessId, ResourceVector, SafeSequence, SimulationInput, SystemState};

// Algorithms
pub use dynamic::{run_dynamic, DynamicScheduler};
pub use need::compute_need;
pub use replay::{check_trace, verify_safe_sequence};
pub use safety::{check_safety, SafetyChecker};

// Arrivals
pub use arrivals::{
    parse_schedule,
    Arrival,
    ArrivalSchedule,
    ArrivalSource,
    IterArrivals,
    NoArrivals,
    QueuedArrivals,
    ScheduledArrivals,
};

// Observability
pub use recorder::{
    CountingRecorder,
    FullRecorder,
    Metrics,
    NullBackend,
    StepRecord,
    StepRecorder,
    StepTag,
    TraceBackend,
    VecBackend,
};

// Sessions and configuration
pub use session::{Outcome, SimulationMode, SimulationSession};
pub use simulation::{SimulationConfig, Simulator, SimulatorBuilder};

/// Static checker keeping the full trace
pub type TracedSafetyChecker = SafetyChecker<VecBackend>;

/// Dynamic scheduler keeping the full trace
pub type TracedDynamicScheduler = DynamicScheduler<VecBackend>;

#[cfg(test)]
mod tests {
    use super::*;

    fn classic() -> SystemState {
        SystemState::new(
            &[vec![0, 1, 0], vec![2, 0, 0], vec![3, 0, 2], vec![2, 1, 1]],
            &[vec![7, 5, 3], vec![3, 2, 2], vec![9, 0, 2], vec![2, 2, 2]],
            &[3, 3, 2],
        )
        .unwrap()
    }

    #[test]
    fn test_traced_aliases() {
        let standard: TracedSafetyChecker =
            SafetyChecker::new(classic(), FullRecorder::new(VecBackend::default()));
        let standard = standard.run();

        let dynamic: TracedDynamicScheduler =
            DynamicScheduler::new(classic(), FullRecorder::new(VecBackend::default()));
        let dynamic = dynamic.run(&mut NoArrivals).unwrap();

        // Same order; the dynamic run needs no terminating pass
        assert_eq!(standard.safe_sequence(), dynamic.safe_sequence());
        assert_eq!(standard.metrics().total_iterations, 3);
        assert_eq!(dynamic.metrics().total_iterations, 2);
    }

    #[test]
    fn test_counting_recorder_builds_no_records() {
        let session = SafetyChecker::new(classic(), CountingRecorder::new(NullBackend)).run();
        assert!(session.steps().is_empty());
        assert_eq!(session.metrics().total_comparisons, 18);
    }
}
