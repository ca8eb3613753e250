//! Trace Storage Backends

use super::record::StepRecord;

/// Errors that can occur while storing a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    /// Backend reached its capacity
    #[error("Trace buffer is full ({capacity} records)")]
    BufferFull {
        /// Configured capacity
        capacity: usize,
    },
}

/// Backend trait for [`StepRecorder`](super::StepRecorder) storage
///
/// Lets the counting-only configuration skip snapshot construction at
/// compile time.
pub trait TraceBackend {
    /// Whether this backend keeps records at all
    ///
    /// When `false` the recorder never builds a `StepRecord`.
    const RECORDS: bool;

    /// Append a record
    ///
    /// # Errors
    /// `BufferFull` once the capacity is reached; the record is dropped.
    fn push(&mut self, record: StepRecord) -> Result<(), RecordError>;

    /// Number of stored records
    fn len(&self) -> usize;

    /// Check if no record is stored
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Stored records in append order
    fn records(&self) -> &[StepRecord];

    /// Consume the backend, yielding its records
    fn into_records(self) -> Vec<StepRecord>;
}

/// Bounded heap-allocated trace
#[derive(Debug, Clone)]
pub struct VecBackend {
    records: Vec<StepRecord>,
    capacity: usize,
}

impl VecBackend {
    /// Create a backend holding at most `capacity` records
    pub fn new(capacity: usize) -> Self {
        Self {
            // Traces are usually small; grow on demand
            records: Vec::with_capacity(capacity.min(64)),
            capacity,
        }
    }

    /// Configured capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for VecBackend {
    fn default() -> Self {
        Self::new(super::DEFAULT_MAX_STEPS)
    }
}

impl TraceBackend for VecBackend {
    const RECORDS: bool = true;

    #[inline]
    fn push(&mut self, record: StepRecord) -> Result<(), RecordError> {
        if self.records.len() >= self.capacity {
            return Err(RecordError::BufferFull {
                capacity: self.capacity,
            });
        }
        self.records.push(record);
        Ok(())
    }

    #[inline]
    fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    fn records(&self) -> &[StepRecord] {
        &self.records
    }

    fn into_records(self) -> Vec<StepRecord> {
        self.records
    }
}

/// Backend that stores nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NullBackend;

impl TraceBackend for NullBackend {
    const RECORDS: bool = false;

    #[inline(always)]
    fn push(&mut self, _record: StepRecord) -> Result<(), RecordError> {
        Ok(())
    }

    #[inline(always)]
    fn len(&self) -> usize {
        0
    }

    #[inline(always)]
    fn records(&self) -> &[StepRecord] {
        &[]
    }

    fn into_records(self) -> Vec<StepRecord> {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::recorder::StepTag;

    fn record(iteration: u64) -> StepRecord {
        StepRecord {
            tag: StepTag::Snapshot { iteration },
            allocation: vec![],
            max: vec![],
            need: vec![],
            available: vec![1],
            executed: None,
            arrivals: None,
            comparisons_so_far: 0,
        }
    }

    #[test]
    fn test_vec_backend_capacity() {
        let mut backend = VecBackend::new(2);
        assert_eq!(backend.capacity(), 2);
        assert_eq!(
            VecBackend::default().capacity(),
            crate::domain::recorder::DEFAULT_MAX_STEPS
        );
        assert!(backend.push(record(0)).is_ok());
        assert!(backend.push(record(1)).is_ok());
        assert_eq!(
            backend.push(record(2)),
            Err(RecordError::BufferFull { capacity: 2 })
        );
        assert_eq!(backend.len(), 2);
        assert_eq!(backend.records()[1].tag.iteration(), 1);
    }

    #[test]
    fn test_null_backend_discards() {
        let mut backend = NullBackend;
        assert!(backend.push(record(0)).is_ok());
        assert!(backend.is_empty());
        assert!(backend.into_records().is_empty());
    }
}
