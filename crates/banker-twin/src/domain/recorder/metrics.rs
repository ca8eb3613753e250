//! Run-level Metrics

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Aggregates of one run, finalized at completion
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Metrics {
    /// Need/work comparisons across all passes
    pub total_comparisons: u64,
    /// Outer passes, including the final one
    pub total_iterations: u64,
    /// Wall-clock time from run start to completion
    #[serde(rename = "elapsed_time", with = "secs_f64")]
    pub elapsed: Duration,
}

impl Metrics {
    /// Elapsed time in seconds
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }
}

/// Durations travel as float seconds
mod secs_f64 {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(value.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(serde::de::Error::custom)
    }
}
