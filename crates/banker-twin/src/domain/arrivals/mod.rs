//! # Arrival Module
//!
//! New processes entering a dynamic run. The scheduler pulls exactly once
//! per iteration; the source decides whether anything arrives.
//!
//! ```text
//! DynamicScheduler ──pull()──▶ ArrivalSource
//!                  ◀─────────  Option<Arrival>
//!
//!   ScheduledArrivals   k-th pull yields the vectors keyed k
//!   QueuedArrivals      one vector per pull, FIFO
//!   IterArrivals<I>     any Iterator<Item = Option<Arrival>>
//!   NoArrivals          never arrives
//! ```
//!
//! Schedules usually come from text (`"0:4,3,3;2:1,1,1|2,0,0"`), see
//! [`parse_schedule`].

pub mod schedule;
pub mod source;

pub use schedule::{parse_schedule, ArrivalSchedule};
pub use source::{ArrivalSource, IterArrivals, NoArrivals, QueuedArrivals, ScheduledArrivals};

use serde::{Deserialize, Serialize};

use super::types::ResourceVector;

/// One arrival event: the max-demand vectors of the processes entering
///
/// Every process in the batch starts with a zero allocation row.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Arrival {
    max_demands: Vec<ResourceVector>,
}

impl Arrival {
    /// A single process entering
    pub fn single(max_demand: ResourceVector) -> Self {
        Self {
            max_demands: vec![max_demand],
        }
    }

    /// Several processes entering in the same iteration
    pub fn batch(max_demands: Vec<ResourceVector>) -> Self {
        Self { max_demands }
    }

    /// Declared max demands, in admission order
    pub fn max_demands(&self) -> &[ResourceVector] {
        &self.max_demands
    }

    /// Number of processes in the batch
    pub fn len(&self) -> usize {
        self.max_demands.len()
    }

    /// Check if the batch carries no process
    pub fn is_empty(&self) -> bool {
        self.max_demands.is_empty()
    }

    /// Consume into the demand vectors
    pub fn into_max_demands(self) -> Vec<ResourceVector> {
        self.max_demands
    }
}

impl From<ResourceVector> for Arrival {
    fn from(max_demand: ResourceVector) -> Self {
        Self::single(max_demand)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrival_constructors() {
        let one = Arrival::single(vec![1, 2]);
        assert_eq!(one.len(), 1);
        assert_eq!(one.max_demands(), &[vec![1, 2]]);

        let many = Arrival::batch(vec![vec![1], vec![2]]);
        assert_eq!(many.len(), 2);
        assert_eq!(many.into_max_demands(), vec![vec![1], vec![2]]);

        assert!(Arrival::default().is_empty());
        assert_eq!(Arrival::from(vec![3]), Arrival::single(vec![3]));
    }
}
