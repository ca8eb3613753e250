//! Core Types for the Banker Simulation
//!
//! Vectors and matrices are plain `Vec`s: the algorithm indexes them by
//! process row and resource column and never needs more structure than that.
//! `SystemState` is the only owner of live matrices during a run.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::{Dimension, SimulationError};
use super::need;

/// Resource counts indexed by resource type (length N)
pub type ResourceVector = Vec<u32>;

/// Row-per-process matrix (M×N)
pub type Matrix = Vec<ResourceVector>;

/// Ordered completion order of processes
pub type SafeSequence = Vec<ProcessId>;

/// Process identifier (row index in the allocation/max matrices)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProcessId(pub usize);

impl ProcessId {
    /// Create a new process identifier
    #[inline(always)]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Get the underlying row index
    #[inline(always)]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// Caller-supplied input record
///
/// Resource names are metadata only and never influence the algorithm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationInput {
    /// Optional resource type names
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<String>,
    /// Resources not held by any process
    pub available: ResourceVector,
    /// Resources currently held, one row per process
    pub allocation: Matrix,
    /// Maximum demand, one row per process
    pub max: Matrix,
}

impl SimulationInput {
    /// Create an input record without resource names
    pub fn new(available: ResourceVector, allocation: Matrix, max: Matrix) -> Self {
        Self {
            resources: Vec::new(),
            available,
            allocation,
            max,
        }
    }

    /// Attach resource type names
    pub fn with_resources<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.resources = names.into_iter().map(Into::into).collect();
        self
    }

    /// Number of processes (M)
    pub fn num_processes(&self) -> usize {
        self.allocation.len()
    }

    /// Number of resource types (N)
    pub fn num_resources(&self) -> usize {
        self.available.len()
    }
}

/// Live matrices of one run
///
/// Built by cloning caller data, so nothing the caller holds is ever
/// mutated. `need` is kept equal to `max - allocation` at all times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemState {
    allocation: Matrix,
    max: Matrix,
    need: Matrix,
    available: ResourceVector,
}

impl SystemState {
    /// Validate and copy a snapshot
    ///
    /// # Errors
    /// - `DimensionMismatch`: row counts or row lengths disagree
    /// - `NegativeNeed`: some `max[i][j] < allocation[i][j]`
    /// - `CapacityOverflow`: total capacity of a resource exceeds `u32`
    pub fn new(
        allocation: &[ResourceVector],
        max: &[ResourceVector],
        available: &[u32],
    ) -> Result<Self, SimulationError> {
        let need = need::validate(allocation, max, available)?;
        let state = Self {
            allocation: allocation.to_vec(),
            max: max.to_vec(),
            need,
            available: available.to_vec(),
        };
        state.total_capacity()?;
        Ok(state)
    }

    /// Validate and copy an input record
    pub fn from_input(input: &SimulationInput) -> Result<Self, SimulationError> {
        Self::new(&input.allocation, &input.max, &input.available)
    }

    /// Number of processes (M)
    pub fn num_processes(&self) -> usize {
        self.allocation.len()
    }

    /// Number of resource types (N)
    pub fn num_resources(&self) -> usize {
        self.available.len()
    }

    /// Allocation matrix
    pub fn allocation(&self) -> &[ResourceVector] {
        &self.allocation
    }

    /// Max-demand matrix
    pub fn max(&self) -> &[ResourceVector] {
        &self.max
    }

    /// Need matrix
    pub fn need(&self) -> &[ResourceVector] {
        &self.need
    }

    /// Live available vector
    pub fn available(&self) -> &[u32] {
        &self.available
    }

    /// `available + Σ allocation`, per resource type
    ///
    /// # Errors
    /// `CapacityOverflow` if a column sum does not fit in `u32`.
    pub fn total_capacity(&self) -> Result<ResourceVector, SimulationError> {
        let mut total = self.available.clone();
        for row in &self.allocation {
            for (resource, (slot, held)) in total.iter_mut().zip(row).enumerate() {
                *slot = slot
                    .checked_add(*held)
                    .ok_or(SimulationError::CapacityOverflow { resource })?;
            }
        }
        Ok(total)
    }

    /// Runnable test: `need[process][j] <= work[j]` for every j
    ///
    /// All N columns are compared; callers account for exactly N
    /// comparisons per call.
    #[inline]
    pub fn is_runnable(&self, process: usize, work: &[u32]) -> bool {
        self.need[process]
            .iter()
            .zip(work)
            .fold(true, |fits, (need, have)| fits & (need <= have))
    }

    /// Add a process allocation into `work`
    ///
    /// Never overflows: `work` is bounded by the total capacity checked on
    /// construction.
    #[inline]
    pub fn release_into(&self, process: usize, work: &mut [u32]) {
        for (slot, held) in work.iter_mut().zip(&self.allocation[process]) {
            *slot += *held;
        }
    }

    /// Release a process allocation into the live available vector
    pub(crate) fn release(&mut self, process: usize) {
        for (slot, held) in self.available.iter_mut().zip(&self.allocation[process]) {
            *slot += *held;
        }
    }

    /// Admit new processes with zero allocation and the given max demands
    ///
    /// The whole need matrix is recomputed afterwards.
    ///
    /// # Errors
    /// `DimensionMismatch` if a demand vector does not have length N; the
    /// state is left untouched in that case.
    pub(crate) fn admit(
        &mut self,
        iteration: u64,
        max_demands: &[ResourceVector],
    ) -> Result<(), SimulationError> {
        let width = self.num_resources();
        if let Some((index, bad)) = max_demands
            .iter()
            .enumerate()
            .find(|(_, demand)| demand.len() != width)
        {
            return Err(SimulationError::DimensionMismatch {
                what: Dimension::Arrival { iteration, index },
                expected: width,
                found: bad.len(),
            });
        }

        for demand in max_demands {
            self.allocation.push(vec![0; width]);
            self.max.push(demand.clone());
        }
        self.need = need::compute_need(&self.allocation, &self.max)?;
        Ok(())
    }
}
