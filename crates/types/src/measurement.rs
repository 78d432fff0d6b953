//! A single timestamped sensor reading.

use crate::error::{SensorError, SensorResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Capture time of a measurement
pub type Timestamp = DateTime<Utc>;

/// Marker for "no reading available"
pub const UNKNOWN: Option<f64> = None;

/// One sample of a sensor: a value (or `UNKNOWN`) and when it was taken
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub value: Option<f64>,
    pub timestamp: Timestamp,
}

impl Measurement {
    /// NaN readings are stored as `UNKNOWN`.
    pub fn new(value: Option<f64>, timestamp: Timestamp) -> Self {
        Self {
            value: value.filter(|v| !v.is_nan()),
            timestamp,
        }
    }

    /// Empty slot: no value, cleared timestamp
    pub fn unknown() -> Self {
        Self {
            value: UNKNOWN,
            timestamp: cleared_timestamp(),
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.value.is_none()
    }

    /// False for empty slots and for samples whose clock read failed
    pub fn has_timestamp(&self) -> bool {
        self.timestamp != cleared_timestamp()
    }
}

impl Default for Measurement {
    fn default() -> Self {
        Self::unknown()
    }
}

/// The zero timestamp (Unix epoch) used for "no capture time"
pub fn cleared_timestamp() -> Timestamp {
    Timestamp::default()
}

/// Read the wall clock.
///
/// Fails when the system clock is set before the Unix epoch or beyond
/// the representable range.
pub fn capture_timestamp() -> SensorResult<Timestamp> {
    let since_epoch = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| SensorError::Clock(e.to_string()))?;

    let secs = i64::try_from(since_epoch.as_secs())
        .map_err(|e| SensorError::Clock(e.to_string()))?;

    DateTime::from_timestamp(secs, since_epoch.subsec_nanos())
        .ok_or_else(|| SensorError::Clock(format!("{:?} since epoch is out of range", since_epoch)))
}
