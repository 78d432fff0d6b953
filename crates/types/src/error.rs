//! Error taxonomy for sensor data maintenance.
//!
//! Lookup misses are not errors: they are reported as `None` by the
//! registry. Clock failures are absorbed by `Sensor::set_current_value`
//! and only surface from [`crate::capture_timestamp`].

use thiserror::Error;

/// Errors raised by sensor data structures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SensorError {
    /// Invalid configuration handed to a constructor or resize
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Read from a buffer that holds no slots
    #[error("measurement buffer has no slots")]
    EmptyState,

    /// The system clock could not be turned into a timestamp
    #[error("clock read failed: {0}")]
    Clock(String),

    /// A sensor with the same identifier is already registered
    #[error("sensor id already registered: {0}")]
    DuplicateId(String),
}

impl SensorError {
    /// Shorthand for the common "capacity must be positive" failure
    pub fn invalid_capacity(capacity: usize) -> Self {
        SensorError::Config(format!("buffer capacity must be at least 1, got {}", capacity))
    }
}

pub type SensorResult<T> = std::result::Result<T, SensorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            SensorError::invalid_capacity(0).to_string(),
            "invalid configuration: buffer capacity must be at least 1, got 0"
        );
        assert_eq!(
            SensorError::DuplicateId("lm75-0 temp1".to_string()).to_string(),
            "sensor id already registered: lm75-0 temp1"
        );
    }
}
