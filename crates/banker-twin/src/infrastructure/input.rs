//! JSON Input Loading
//!
//! The record format is
//! `{"resources": [..], "available": [..], "allocation": [[..]], "max": [[..]]}`
//! with `resources` optional. Shape checks happen here so a bad file is
//! reported before a run starts.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use crate::domain::need;
use crate::domain::types::SimulationInput;

/// Read and validate an input record from a file
///
/// # Errors
/// I/O failures, malformed JSON and validation errors, each with the path
/// in its context.
pub fn load_input(path: impl AsRef<Path>) -> Result<SimulationInput> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read input file {}", path.display()))?;

    let input = parse_input(&text).with_context(|| format!("Invalid input in {}", path.display()))?;
    debug!(
        path = %path.display(),
        processes = input.num_processes(),
        resources = input.num_resources(),
        "input loaded"
    );
    Ok(input)
}

/// Parse and validate an input record
///
/// # Errors
/// Malformed JSON, or matrices that fail shape or need validation.
pub fn parse_input(text: &str) -> Result<SimulationInput> {
    let input: SimulationInput =
        serde_json::from_str(text).context("Failed to parse input JSON")?;

    need::validate(&input.allocation, &input.max, &input.available)
        .context("Input matrices are inconsistent")?;

    if !input.resources.is_empty() && input.resources.len() != input.num_resources() {
        anyhow::bail!(
            "Expected {} resource names, found {}",
            input.num_resources(),
            input.resources.len()
        );
    }
    Ok(input)
}

/// Textbook snapshot with resource types A, B and C
///
/// Safe, with completion order P1, P3, P0, P2.
pub fn sample_input() -> SimulationInput {
    SimulationInput::new(
        vec![3, 3, 2],
        vec![vec![0, 1, 0], vec![2, 0, 0], vec![3, 0, 2], vec![2, 1, 1]],
        vec![vec![7, 5, 3], vec![3, 2, 2], vec![9, 0, 2], vec![2, 2, 2]],
    )
    .with_resources(["A", "B", "C"])
}
