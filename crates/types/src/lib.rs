//! hwsens-types: Shared data types for the hwsens sensor history engine.
//!
//! This crate contains pure data types (sensor type flags, measurements,
//! colors and the error taxonomy) shared by every hwsens crate. Nothing in
//! here performs I/O, which keeps it usable as the foundation layer.

pub mod color;
pub mod error;
pub mod measurement;
pub mod sensor_type;

// Re-export commonly used types at the crate root for convenience
pub use color::Color;
pub use error::{SensorError, SensorResult};
pub use measurement::{capture_timestamp, cleared_timestamp, Measurement, Timestamp, UNKNOWN};
pub use sensor_type::SensorType;
