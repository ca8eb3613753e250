//! Simulation Engine - Configured Entry Point
//!
//! `Simulator` picks the recorder backend from its configuration and hands
//! the caller a finished [`SimulationSession`]. Each run clones its input,
//! so two runs over the same input share nothing.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::arrivals::ArrivalSource;
use super::dynamic::DynamicScheduler;
use super::error::SimulationError;
use super::recorder::{NullBackend, StepRecorder, VecBackend, DEFAULT_MAX_STEPS};
use super::safety::SafetyChecker;
use super::session::SimulationSession;
use super::types::{SimulationInput, SystemState};

/// Run configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Keep the step trace (counters are always kept)
    pub record_steps: bool,

    /// Trace capacity; later records are dropped and the session marked
    /// truncated
    pub max_recorded_steps: usize,

    /// Bound on dynamic iterations (`None` = unbounded)
    pub max_iterations: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            record_steps: true,
            max_recorded_steps: DEFAULT_MAX_STEPS,
            max_iterations: None,
        }
    }
}

/// Runs both checkers under one configuration
#[derive(Debug, Clone, Default)]
pub struct Simulator {
    config: SimulationConfig,
}

impl Simulator {
    /// Create a simulator with an explicit configuration
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    /// Active configuration
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Static safety check
    ///
    /// # Errors
    /// Validation errors of the input, raised before any record exists.
    pub fn run_standard(
        &self,
        input: &SimulationInput,
    ) -> Result<SimulationSession, SimulationError> {
        let state = SystemState::from_input(input)?;
        debug!(
            processes = state.num_processes(),
            resources = state.num_resources(),
            record = self.config.record_steps,
            "starting standard run"
        );

        let session = if self.config.record_steps {
            SafetyChecker::new(state, self.full_recorder()).run()
        } else {
            SafetyChecker::new(state, StepRecorder::new(NullBackend)).run()
        };
        Ok(session)
    }

    /// Dynamic run pulling arrivals from `source`
    ///
    /// # Errors
    /// Validation errors of the input or of an arrival, and
    /// `IterationLimitExceeded` when `max_iterations` is hit.
    pub fn run_dynamic<S>(
        &self,
        input: &SimulationInput,
        source: &mut S,
    ) -> Result<SimulationSession, SimulationError>
    where
        S: ArrivalSource + ?Sized,
    {
        let state = SystemState::from_input(input)?;
        debug!(
            processes = state.num_processes(),
            resources = state.num_resources(),
            record = self.config.record_steps,
            max_iterations = ?self.config.max_iterations,
            "starting dynamic run"
        );

        if self.config.record_steps {
            DynamicScheduler::new(state, self.full_recorder())
                .max_iterations(self.config.max_iterations)
                .run(source)
        } else {
            DynamicScheduler::new(state, StepRecorder::new(NullBackend))
                .max_iterations(self.config.max_iterations)
                .run(source)
        }
    }

    fn full_recorder(&self) -> StepRecorder<VecBackend> {
        StepRecorder::new(VecBackend::new(self.config.max_recorded_steps))
    }
}

/// Fluent construction of a [`Simulator`]
///
/// # Example
///
/// ```rust
/// use banker_twin::domain::simulation::SimulatorBuilder;
/// use banker_twin::SimulationInput;
///
/// let simulator = SimulatorBuilder::new()
///     .record_steps(false)
///     .max_iterations(Some(1_000))
///     .build();
///
/// let input = SimulationInput::new(vec![1], vec![vec![0]], vec![vec![1]]);
/// let session = simulator.run_standard(&input).unwrap();
/// assert!(session.is_safe());
/// assert!(session.steps().is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct SimulatorBuilder {
    config: SimulationConfig,
}

impl SimulatorBuilder {
    /// Create a builder with default configuration
    ///
    /// Defaults:
    /// - Trace recording enabled
    /// - Max 100,000 recorded steps
    /// - Unbounded dynamic iterations
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable the step trace
    pub fn record_steps(mut self, enable: bool) -> Self {
        self.config.record_steps = enable;
        self
    }

    /// Set the trace capacity
    pub fn max_recorded_steps(mut self, max: usize) -> Self {
        self.config.max_recorded_steps = max;
        self
    }

    /// Bound the dynamic run
    pub fn max_iterations(mut self, limit: Option<u64>) -> Self {
        self.config.max_iterations = limit;
        self
    }

    /// Build the simulator
    pub fn build(self) -> Simulator {
        Simulator::new(self.config)
    }
}
