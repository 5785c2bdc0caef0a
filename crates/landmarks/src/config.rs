//! Engine configuration
//!
//! Durations are (de)serialized as whole milliseconds.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

/// Rescan throttling settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Length of one rate measurement window
    #[serde(with = "duration_ms")]
    pub window: Duration,

    /// Notifications per window at which rescans are deferred
    pub threshold: u32,

    /// Quiet time that fires a deferred rescan
    #[serde(with = "duration_ms")]
    pub quiet_period: Duration,

    /// Longest a deferred rescan may wait under continuous churn
    #[serde(with = "duration_ms")]
    pub max_wait: Duration,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            window: Duration::from_millis(500),
            threshold: 10,
            quiet_period: Duration::from_millis(500),
            max_wait: Duration::from_secs(5),
        }
    }
}

/// Engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub id: String,

    /// Stored `debugInfo` option; enables verbose diagnostics
    #[serde(rename = "debugInfo")]
    pub debug_info: bool,

    /// Capacity of the change-batch channel
    pub change_capacity: usize,

    /// Capacity of the request channel
    pub request_capacity: usize,

    pub scheduler: SchedulerConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            id: Uuid::now_v7().to_string(),
            debug_info: false,
            change_capacity: 256,
            request_capacity: 32,
            scheduler: SchedulerConfig::default(),
        }
    }
}

/// A change to stored options, as delivered by the options store
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionsChange {
    #[serde(rename = "debugInfo", default, skip_serializing_if = "Option::is_none")]
    pub debug_info: Option<bool>,
}

mod duration_ms {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_millis(u64::deserialize(deserializer)?))
    }
}
