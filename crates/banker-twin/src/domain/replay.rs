//! Replay Verification
//!
//! Independent checks that a result is consistent with its input. Neither
//! function shares code paths with the checkers beyond `SystemState`.

use super::error::ReplayError;
use super::recorder::StepRecord;
use super::types::{ProcessId, ResourceVector, SystemState};

/// Replay a claimed safe sequence against a snapshot
///
/// # Returns
/// The final work vector, equal to `available + Σ allocation` for any
/// sequence that passes.
///
/// # Errors
/// - `Invalid`: the snapshot fails validation
/// - `UnknownProcess` / `Duplicate`: bad sequence entries
/// - `InsufficientWork`: an entry was scheduled while `need > work`
/// - `Incomplete`: some process never appears
pub fn verify_safe_sequence(
    allocation: &[ResourceVector],
    max: &[ResourceVector],
    available: &[u32],
    sequence: &[ProcessId],
) -> Result<ResourceVector, ReplayError> {
    let state = SystemState::new(allocation, max, available)?;
    let processes = state.num_processes();

    let mut work = available.to_vec();
    let mut seen = vec![false; processes];

    for &process in sequence {
        let index = process.index();
        if index >= processes {
            return Err(ReplayError::UnknownProcess { process, processes });
        }
        if seen[index] {
            return Err(ReplayError::Duplicate { process });
        }
        if !state.is_runnable(index, &work) {
            return Err(ReplayError::InsufficientWork {
                process,
                need: state.need()[index].clone(),
                work,
            });
        }

        state.release_into(index, &mut work);
        seen[index] = true;
    }

    if sequence.len() != processes {
        return Err(ReplayError::Incomplete {
            covered: sequence.len(),
            processes,
        });
    }
    Ok(work)
}

/// Check that every record of a trace follows from the one before it
///
/// An execution record must add exactly the executed process's allocation
/// to the previous `available`, and that process must have fit; any other
/// record leaves `available` unchanged.
///
/// # Errors
/// `InsufficientWork` for an execution that did not fit,
/// `UnknownProcess` for an execution outside the matrices,
/// `TraceDiscontinuity` for any other inconsistency.
pub fn check_trace(steps: &[StepRecord]) -> Result<(), ReplayError> {
    for (offset, pair) in steps.windows(2).enumerate() {
        let (prev, next) = (&pair[0], &pair[1]);
        let index = offset + 1;

        let expected = match next.executed {
            None => Some(prev.available.clone()),
            Some(process) => {
                let (held, need) = next
                    .allocation
                    .get(process.index())
                    .zip(next.need.get(process.index()))
                    .ok_or(ReplayError::UnknownProcess {
                        process,
                        processes: next.num_processes(),
                    })?;

                let fits = need.len() == prev.available.len()
                    && need.iter().zip(&prev.available).all(|(n, w)| n <= w);
                if !fits {
                    return Err(ReplayError::InsufficientWork {
                        process,
                        need: need.clone(),
                        work: prev.available.clone(),
                    });
                }

                (held.len() == prev.available.len())
                    .then(|| {
                        prev.available
                            .iter()
                            .zip(held)
                            .map(|(have, add)| have.checked_add(*add))
                            .collect::<Option<ResourceVector>>()
                    })
                    .flatten()
            }
        };

        if expected.as_ref() != Some(&next.available) {
            return Err(ReplayError::TraceDiscontinuity { index });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::SimulationError;
    use crate::domain::recorder::{StepRecorder, VecBackend};
    use crate::domain::safety::SafetyChecker;

    fn classic() -> (Vec<ResourceVector>, Vec<ResourceVector>, ResourceVector) {
        (
            vec![vec![0, 1, 0], vec![2, 0, 0], vec![3, 0, 2], vec![2, 1, 1]],
            vec![vec![7, 5, 3], vec![3, 2, 2], vec![9, 0, 2], vec![2, 2, 2]],
            vec![3, 3, 2],
        )
    }

    fn ids(raw: &[usize]) -> Vec<ProcessId> {
        raw.iter().copied().map(ProcessId::new).collect()
    }

    #[test]
    fn test_valid_sequence_returns_capacity() {
        let (allocation, max, available) = classic();
        let work =
            verify_safe_sequence(&allocation, &max, &available, &ids(&[1, 3, 0, 2])).unwrap();
        assert_eq!(work, vec![10, 5, 5]);

        // Another valid order reaches the same total
        let work =
            verify_safe_sequence(&allocation, &max, &available, &ids(&[1, 3, 2, 0])).unwrap();
        assert_eq!(work, vec![10, 5, 5]);
    }

    #[test]
    fn test_insufficient_work() {
        let (allocation, max, available) = classic();
        let err = verify_safe_sequence(&allocation, &max, &available, &ids(&[0])).unwrap_err();
        assert_eq!(
            err,
            ReplayError::InsufficientWork {
                process: ProcessId(0),
                need: vec![7, 4, 3],
                work: vec![3, 3, 2],
            }
        );
    }

    #[test]
    fn test_bad_entries() {
        let (allocation, max, available) = classic();

        let err = verify_safe_sequence(&allocation, &max, &available, &ids(&[1, 1])).unwrap_err();
        assert_eq!(err, ReplayError::Duplicate { process: ProcessId(1) });

        let err = verify_safe_sequence(&allocation, &max, &available, &ids(&[7])).unwrap_err();
        assert_eq!(
            err,
            ReplayError::UnknownProcess {
                process: ProcessId(7),
                processes: 4,
            }
        );

        let err = verify_safe_sequence(&allocation, &max, &available, &ids(&[1, 3])).unwrap_err();
        assert_eq!(err, ReplayError::Incomplete { covered: 2, processes: 4 });
    }

    #[test]
    fn test_invalid_snapshot() {
        let err = verify_safe_sequence(&[vec![2]], &[vec![1]], &[0], &[]).unwrap_err();
        assert!(matches!(
            err,
            ReplayError::Invalid(SimulationError::NegativeNeed { .. })
        ));
    }

    fn classic_trace() -> Vec<StepRecord> {
        let (allocation, max, available) = classic();
        let state = SystemState::new(&allocation, &max, &available).unwrap();
        let session = SafetyChecker::new(state, StepRecorder::new(VecBackend::default())).run();
        session.into_parts().0
    }

    #[test]
    fn test_checker_trace_is_continuous() {
        assert!(check_trace(&classic_trace()).is_ok());
        assert!(check_trace(&[]).is_ok());
    }

    #[test]
    fn test_tampered_trace_detected() {
        let mut steps = classic_trace();
        steps[3].available[0] += 1;
        assert_eq!(
            check_trace(&steps),
            Err(ReplayError::TraceDiscontinuity { index: 3 })
        );
    }

    #[test]
    fn test_tampered_execution_detected() {
        let mut steps = classic_trace();
        // Claim P0 ran first instead of P1
        steps[1].executed = Some(ProcessId(0));
        assert!(matches!(
            check_trace(&steps),
            Err(ReplayError::InsufficientWork { process: ProcessId(0), .. })
        ));
    }
}
