//! Dynamic Scheduler - Banker's Algorithm with Arrivals
//!
//! # Iteration
//!
//! ```text
//! while some process is unfinished:
//!     pull one event from the source
//!     if it carries processes: admit them (zero allocation), recompute need
//!     one pass over unfinished processes, ascending index, live `available`
//!     stuck iff the pass finished nothing and nothing arrived
//! ```
//!
//! The iteration that admitted a process is never declared stuck: the
//! newcomer gets one full pass before the run can give up on it. Arrivals
//! still scheduled after every process finished are never pulled.

use tracing::{debug, info};

use super::arrivals::ArrivalSource;
use super::error::SimulationError;
use super::recorder::{NullBackend, StepRecorder, TraceBackend};
use super::session::{Outcome, SimulationMode, SimulationSession};
use super::types::{ProcessId, ResourceVector, SafeSequence, SystemState};

/// Iterated Banker's check where processes may join mid-run
#[derive(Debug)]
pub struct DynamicScheduler<B: TraceBackend> {
    state: SystemState,
    recorder: StepRecorder<B>,
    max_iterations: Option<u64>,
}

impl<B: TraceBackend> DynamicScheduler<B> {
    /// Create an unbounded scheduler over a validated state
    pub fn new(state: SystemState, recorder: StepRecorder<B>) -> Self {
        Self {
            state,
            recorder,
            max_iterations: None,
        }
    }

    /// Bound the number of iterations (`None` = unbounded)
    pub fn max_iterations(mut self, limit: Option<u64>) -> Self {
        self.max_iterations = limit;
        self
    }

    /// Drive the run until every process finished or the run is stuck
    ///
    /// # Recording
    /// - `T{k}.arrival` once per iteration that admitted processes
    /// - `T{k}` before the pass
    /// - `T{k}.exec` after each finished process
    ///
    /// # Errors
    /// - `DimensionMismatch` for an arrival vector of the wrong width
    /// - `IterationLimitExceeded` when the configured bound is hit
    pub fn run<S>(mut self, source: &mut S) -> Result<SimulationSession, SimulationError>
    where
        S: ArrivalSource + ?Sized,
    {
        let mut finished = vec![false; self.state.num_processes()];
        let mut sequence = SafeSequence::with_capacity(finished.len());
        let mut iteration: u64 = 0;

        self.recorder.start();
        while sequence.len() < finished.len() {
            if let Some(limit) = self.max_iterations {
                if iteration >= limit {
                    return Err(SimulationError::IterationLimitExceeded { limit });
                }
            }
            self.recorder.begin_iteration();

            let arrived = match source.pull() {
                Some(arrival) if !arrival.is_empty() => {
                    self.state.admit(iteration, arrival.max_demands())?;
                    finished.resize(self.state.num_processes(), false);
                    debug!(iteration, count = arrival.len(), "processes admitted");
                    self.recorder
                        .arrival(iteration, &self.state, arrival.max_demands());
                    true
                }
                _ => false,
            };

            self.recorder
                .snapshot(iteration, &self.state, self.state.available());

            let progressed = self.pass(iteration, &mut finished, &mut sequence);

            if !progressed && !arrived {
                let blocked = blocked(&finished);
                info!(
                    iteration,
                    blocked = blocked.len(),
                    comparisons = self.recorder.comparisons(),
                    "dynamic run stuck"
                );
                let outcome = Outcome::Stuck {
                    iteration,
                    partial: sequence,
                    blocked,
                };
                return Ok(self.into_session(outcome));
            }

            iteration += 1;
        }

        info!(
            processes = sequence.len(),
            comparisons = self.recorder.comparisons(),
            iterations = self.recorder.iterations(),
            "dynamic run complete"
        );
        Ok(self.into_session(Outcome::Safe { sequence }))
    }

    /// One scan over unfinished processes; true if any finished
    fn pass(&mut self, iteration: u64, finished: &mut [bool], sequence: &mut SafeSequence) -> bool {
        let resources = self.state.num_resources();
        let mut progressed = false;

        for index in 0..finished.len() {
            if finished[index] {
                continue;
            }

            self.recorder.count_comparisons(resources);
            if !self.state.is_runnable(index, self.state.available()) {
                continue;
            }

            let process = ProcessId::new(index);
            self.state.release(index);
            finished[index] = true;
            sequence.push(process);
            progressed = true;

            debug!(%process, iteration, available = ?self.state.available(), "process finished");
            self.recorder
                .execution(iteration, &self.state, self.state.available(), process);
        }

        progressed
    }

    fn into_session(self, outcome: Outcome) -> SimulationSession {
        SimulationSession::from_recorder(SimulationMode::Dynamic, self.recorder, outcome)
    }
}

fn blocked(finished: &[bool]) -> Vec<ProcessId> {
    finished
        .iter()
        .enumerate()
        .filter(|(_, done)| !**done)
        .map(|(index, _)| ProcessId::new(index))
        .collect()
}

/// Dynamic Banker's run without a trace
///
/// # Returns
/// - `Ok(Some(sequence))`: every process, including arrivals, finished
/// - `Ok(None)`: the run got stuck
///
/// # Errors
/// Validation of the initial snapshot or of an arrival vector.
pub fn run_dynamic<S>(
    allocation: &[ResourceVector],
    max: &[ResourceVector],
    available: &[u32],
    source: &mut S,
) -> Result<Option<SafeSequence>, SimulationError>
where
    S: ArrivalSource + ?Sized,
{
    let state = SystemState::new(allocation, max, available)?;
    let session = DynamicScheduler::new(state, StepRecorder::new(NullBackend)).run(source)?;
    let (_, _, outcome) = session.into_parts();
    Ok(outcome.into_safe_sequence())
}
