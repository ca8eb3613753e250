//! Arrival Schedule Parser
//!
//! # Grammar
//!
//! ```text
//! schedule := entry (';' entry)*
//! entry    := iteration ':' vector ('|' vector)*
//! vector   := count (',' count)*
//! ```
//!
//! `"0:4,3,3;2:1,1,1|2,0,0"` admits one process at T0 and two at T2.
//!
//! Parsing never fails. Malformed pieces are dropped and logged at `debug`:
//! an entry without `:` or with a bad iteration goes entirely, a vector with
//! a bad count goes alone. Vector widths are checked by the scheduler on
//! admission, not here.

use std::collections::BTreeMap;

use tracing::debug;

use crate::domain::types::ResourceVector;

/// Max-demand vectors keyed by the iteration they arrive at
pub type ArrivalSchedule = BTreeMap<u64, Vec<ResourceVector>>;

/// Why a piece of the schedule text was dropped
#[derive(Debug, thiserror::Error)]
enum MalformedEntry {
    #[error("missing ':' separator")]
    MissingSeparator,

    #[error("bad iteration {0:?}")]
    BadIteration(String),

    #[error("bad count {0:?}")]
    BadCount(String),

    #[error("empty vector")]
    EmptyVector,

    #[error("no usable vector")]
    NoVectors,
}

/// Parse schedule text into an [`ArrivalSchedule`]
///
/// Whitespace around tokens is ignored, and so are empty items between
/// commas. A repeated iteration appends to the vectors already parsed for
/// it. Blank text yields an empty schedule.
///
/// # Example
///
/// ```rust
/// use banker_twin::domain::arrivals::parse_schedule;
///
/// let schedule = parse_schedule("0:4,3,3; 2:1,1,1|2,0,0; junk");
/// assert_eq!(schedule[&0], vec![vec![4, 3, 3]]);
/// assert_eq!(schedule[&2].len(), 2);
/// assert_eq!(schedule.len(), 2);
/// ```
pub fn parse_schedule(text: &str) -> ArrivalSchedule {
    let mut schedule = ArrivalSchedule::new();

    for entry in text.split(';').map(str::trim).filter(|e| !e.is_empty()) {
        match parse_entry(entry) {
            Ok((iteration, vectors)) => {
                schedule.entry(iteration).or_default().extend(vectors);
            }
            Err(err) => debug!(entry, %err, "dropping arrival entry"),
        }
    }

    schedule
}

fn parse_entry(entry: &str) -> Result<(u64, Vec<ResourceVector>), MalformedEntry> {
    let (iteration, body) = entry
        .split_once(':')
        .ok_or(MalformedEntry::MissingSeparator)?;

    let iteration = iteration.trim();
    let iteration: u64 = iteration
        .parse()
        .map_err(|_| MalformedEntry::BadIteration(iteration.to_owned()))?;

    let mut vectors = Vec::new();
    for raw in body.split('|').map(str::trim).filter(|v| !v.is_empty()) {
        match parse_vector(raw) {
            Ok(vector) => vectors.push(vector),
            Err(err) => debug!(iteration, vector = raw, %err, "dropping arrival vector"),
        }
    }

    if vectors.is_empty() {
        return Err(MalformedEntry::NoVectors);
    }
    Ok((iteration, vectors))
}

fn parse_vector(raw: &str) -> Result<ResourceVector, MalformedEntry> {
    let vector = raw
        .split(',')
        .map(str::trim)
        .filter(|count| !count.is_empty())
        .map(|count| {
            count
                .parse::<u32>()
                .map_err(|_| MalformedEntry::BadCount(count.to_owned()))
        })
        .collect::<Result<ResourceVector, _>>()?;

    if vector.is_empty() {
        return Err(MalformedEntry::EmptyVector);
    }
    Ok(vector)
}
