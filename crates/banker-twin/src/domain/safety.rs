//! Safety Checker - Static Banker's Algorithm
//!
//! # Algorithm
//!
//! ```text
//! work   := copy of available
//! finish := [false; M]
//! repeat
//!     for i in 0..M (ascending):
//!         if !finish[i] and need[i] <= work (all N columns compared):
//!             work += allocation[i]; finish[i] := true; append i
//! until a full pass finishes nothing
//! ```
//!
//! A pass that finishes a process triggers another full pass, because the
//! released resources may unblock processes already scanned. Within a pass
//! the first runnable process in index order executes first, which makes
//! the sequence reproducible. Worst case O(M² · N).

use tracing::{debug, info};

use super::error::SimulationError;
use super::recorder::{NullBackend, StepRecorder, TraceBackend};
use super::session::{Outcome, SimulationMode, SimulationSession};
use super::types::{ProcessId, ResourceVector, SafeSequence, SystemState};

/// Static safety check over one snapshot
///
/// Owns its copy of the state; the snapshot given by the caller is never
/// touched.
#[derive(Debug)]
pub struct SafetyChecker<B: TraceBackend> {
    state: SystemState,
    recorder: StepRecorder<B>,
}

impl<B: TraceBackend> SafetyChecker<B> {
    /// Create a checker over a validated state
    pub fn new(state: SystemState, recorder: StepRecorder<B>) -> Self {
        Self { state, recorder }
    }

    /// Run the fixed-point search to completion
    ///
    /// # Recording
    /// - `T{k}` before pass k, with `available` = work
    /// - `T{k}.exec` after each finished process, with the updated work
    ///
    /// The terminating zero-progress pass is recorded and counted too.
    pub fn run(mut self) -> SimulationSession {
        let processes = self.state.num_processes();
        let resources = self.state.num_resources();

        let mut work: ResourceVector = self.state.available().to_vec();
        let mut finished = vec![false; processes];
        let mut sequence = SafeSequence::with_capacity(processes);
        let mut pass: u64 = 0;

        self.recorder.start();
        loop {
            self.recorder.begin_iteration();
            self.recorder.snapshot(pass, &self.state, &work);

            let mut progressed = false;
            for index in 0..processes {
                if finished[index] {
                    continue;
                }

                self.recorder.count_comparisons(resources);
                if !self.state.is_runnable(index, &work) {
                    continue;
                }

                let process = ProcessId::new(index);
                self.state.release_into(index, &mut work);
                finished[index] = true;
                sequence.push(process);
                progressed = true;

                debug!(%process, pass, ?work, "process finished");
                self.recorder.execution(pass, &self.state, &work, process);
            }

            pass += 1;
            if !progressed {
                break;
            }
        }

        let outcome = if sequence.len() == processes {
            Outcome::Safe { sequence }
        } else {
            let blocked = (0..processes)
                .filter(|&index| !finished[index])
                .map(ProcessId::new)
                .collect();
            Outcome::Unsafe {
                partial: sequence,
                blocked,
            }
        };

        info!(
            safe = outcome.is_safe(),
            comparisons = self.recorder.comparisons(),
            iterations = self.recorder.iterations(),
            "standard run complete"
        );

        SimulationSession::from_recorder(SimulationMode::Standard, self.recorder, outcome)
    }
}

/// Static Banker's check without a trace
///
/// # Returns
/// - `Ok(Some(sequence))`: the snapshot is safe
/// - `Ok(None)`: no safe completion order exists
///
/// # Errors
/// Any validation error of the snapshot; raised before scanning.
///
/// # Example
///
/// ```rust
/// use banker_twin::domain::safety::check_safety;
/// use banker_twin::ProcessId;
///
/// let allocation = vec![vec![0, 1, 0], vec![2, 0, 0], vec![3, 0, 2], vec![2, 1, 1]];
/// let max = vec![vec![7, 5, 3], vec![3, 2, 2], vec![9, 0, 2], vec![2, 2, 2]];
///
/// let sequence = check_safety(&allocation, &max, &[3, 3, 2]).unwrap().unwrap();
/// assert_eq!(sequence, vec![ProcessId(1), ProcessId(3), ProcessId(0), ProcessId(2)]);
/// ```
pub fn check_safety(
    allocation: &[ResourceVector],
    max: &[ResourceVector],
    available: &[u32],
) -> Result<Option<SafeSequence>, SimulationError> {
    let state = SystemState::new(allocation, max, available)?;
    let session = SafetyChecker::new(state, StepRecorder::new(NullBackend)).run();
    let (_, _, outcome) = session.into_parts();
    Ok(outcome.into_safe_sequence())
}
