//! Need Computation
//!
//! `need[i][j] = max[i][j] - allocation[i][j]`, checked. A negative cell
//! means the input is invalid, not that the state is unsafe, so it is
//! reported as an error before any scan starts.

use super::error::{Dimension, SimulationError};
use super::types::{Matrix, ProcessId, ResourceVector};

/// Derive the need matrix from allocation and max
///
/// Pure: called once at run start and again whenever arrivals grow the
/// process set.
///
/// # Errors
/// - `DimensionMismatch`: row counts differ, or a max row is not as wide as
///   its allocation row
/// - `NegativeNeed`: `max[i][j] < allocation[i][j]`
///
/// # Example
///
/// ```rust
/// use banker_twin::domain::need::compute_need;
///
/// let need = compute_need(&[vec![0, 1, 0]], &[vec![7, 5, 3]]).unwrap();
/// assert_eq!(need, vec![vec![7, 4, 3]]);
/// ```
pub fn compute_need(
    allocation: &[ResourceVector],
    max: &[ResourceVector],
) -> Result<Matrix, SimulationError> {
    if allocation.len() != max.len() {
        return Err(SimulationError::DimensionMismatch {
            what: Dimension::ProcessCount,
            expected: allocation.len(),
            found: max.len(),
        });
    }

    allocation
        .iter()
        .zip(max)
        .enumerate()
        .map(|(row, (held, claim))| need_row(ProcessId::new(row), held, claim))
        .collect()
}

fn need_row(
    process: ProcessId,
    held: &[u32],
    claim: &[u32],
) -> Result<ResourceVector, SimulationError> {
    if held.len() != claim.len() {
        return Err(SimulationError::DimensionMismatch {
            what: Dimension::MaxRow(process),
            expected: held.len(),
            found: claim.len(),
        });
    }

    held.iter()
        .zip(claim)
        .enumerate()
        .map(|(resource, (&allocation, &max))| {
            max.checked_sub(allocation)
                .ok_or(SimulationError::NegativeNeed {
                    process,
                    resource,
                    max,
                    allocation,
                })
        })
        .collect()
}

/// Full snapshot validation
///
/// Checks that every allocation row has length `available.len()`, then
/// everything [`compute_need`] checks (row counts, max row widths, signs).
/// The first failing check is reported.
///
/// # Returns
///
/// The need matrix of the validated snapshot.
pub fn validate(
    allocation: &[ResourceVector],
    max: &[ResourceVector],
    available: &[u32],
) -> Result<Matrix, SimulationError> {
    let width = available.len();
    if let Some((row, held)) = allocation
        .iter()
        .enumerate()
        .find(|(_, held)| held.len() != width)
    {
        return Err(SimulationError::DimensionMismatch {
            what: Dimension::AllocationRow(ProcessId::new(row)),
            expected: width,
            found: held.len(),
        });
    }

    compute_need(allocation, max)
}
