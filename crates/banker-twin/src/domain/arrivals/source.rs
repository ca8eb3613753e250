//! Arrival Sources
//!
//! Pull-based and synchronous. A finite source that runs out keeps
//! answering `None`.

use std::collections::VecDeque;
use std::iter::Fuse;

use super::schedule::ArrivalSchedule;
use super::Arrival;
use crate::domain::types::ResourceVector;

/// Pull-based, possibly infinite sequence of arrival events
pub trait ArrivalSource {
    /// Pull the event for the next iteration
    ///
    /// `None` means nothing arrives this iteration. Called exactly once per
    /// scheduler iteration.
    fn pull(&mut self) -> Option<Arrival>;
}

impl<S: ArrivalSource + ?Sized> ArrivalSource for &mut S {
    #[inline]
    fn pull(&mut self) -> Option<Arrival> {
        (**self).pull()
    }
}

impl<S: ArrivalSource + ?Sized> ArrivalSource for Box<S> {
    #[inline]
    fn pull(&mut self) -> Option<Arrival> {
        (**self).pull()
    }
}

/// Source that never produces an arrival
#[derive(Debug, Clone, Copy, Default)]
pub struct NoArrivals;

impl ArrivalSource for NoArrivals {
    #[inline(always)]
    fn pull(&mut self) -> Option<Arrival> {
        None
    }
}

/// Iteration-keyed schedule
///
/// The k-th pull (counting from 0) yields the vectors stored at key k.
#[derive(Debug, Clone, Default)]
pub struct ScheduledArrivals {
    schedule: ArrivalSchedule,
    cursor: u64,
}

impl ScheduledArrivals {
    /// Wrap a schedule; the cursor starts at iteration 0
    pub fn new(schedule: ArrivalSchedule) -> Self {
        Self {
            schedule,
            cursor: 0,
        }
    }

    /// Entries not pulled yet
    pub fn pending(&self) -> usize {
        self.schedule.range(self.cursor..).count()
    }

    /// Iteration the next pull corresponds to
    pub fn cursor(&self) -> u64 {
        self.cursor
    }
}

impl From<ArrivalSchedule> for ScheduledArrivals {
    fn from(schedule: ArrivalSchedule) -> Self {
        Self::new(schedule)
    }
}

impl ArrivalSource for ScheduledArrivals {
    fn pull(&mut self) -> Option<Arrival> {
        let iteration = self.cursor;
        self.cursor = self.cursor.saturating_add(1);
        self.schedule.remove(&iteration).map(Arrival::batch)
    }
}

/// FIFO of single-process arrivals, one per pull
#[derive(Debug, Clone, Default)]
pub struct QueuedArrivals {
    queue: VecDeque<ResourceVector>,
}

impl QueuedArrivals {
    /// Empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a max-demand vector at the back
    pub fn push(&mut self, max_demand: ResourceVector) {
        self.queue.push_back(max_demand);
    }

    /// Vectors not pulled yet
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Check if the queue is drained
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl FromIterator<ResourceVector> for QueuedArrivals {
    fn from_iter<T: IntoIterator<Item = ResourceVector>>(iter: T) -> Self {
        Self {
            queue: iter.into_iter().collect(),
        }
    }
}

impl ArrivalSource for QueuedArrivals {
    fn pull(&mut self) -> Option<Arrival> {
        self.queue.pop_front().map(Arrival::single)
    }
}

/// Adapter over any iterator of per-iteration events
///
/// `Some(None)` items are quiet iterations; the end of the iterator means
/// no further arrivals.
#[derive(Debug, Clone)]
pub struct IterArrivals<I: Iterator<Item = Option<Arrival>>> {
    inner: Fuse<I>,
}

impl<I: Iterator<Item = Option<Arrival>>> IterArrivals<I> {
    /// Wrap an iterator
    pub fn new<T>(iter: T) -> Self
    where
        T: IntoIterator<IntoIter = I>,
    {
        Self {
            inner: iter.into_iter().fuse(),
        }
    }
}

impl<I: Iterator<Item = Option<Arrival>>> ArrivalSource for IterArrivals<I> {
    fn pull(&mut self) -> Option<Arrival> {
        self.inner.next().flatten()
    }
}
