//! hwsens-core: Sensor history, alarm and registry engine.
//!
//! This crate contains the per-sensor measurement buffer, the alarm edge
//! detector, the `Sensor` aggregate, the `SensorRegistry` and the
//! `SourceAdapter` trait implemented by hardware backends.
//!
//! Nothing here locks. Callers sharing a registry between threads must
//! serialize access themselves: at most one writer per sensor, and no
//! reader may observe a sensor while a sample is being pushed.

pub mod constants;
mod alarm;
mod measures;
mod registry;
mod sensor;
mod source_adapter;

pub use alarm::{AlarmCallback, AlarmEvaluator, AlarmState};
pub use constants::{DEFAULT_BUFFER_LENGTH, DEFAULT_UPDATE_INTERVAL, DEFAULT_UPDATE_INTERVAL_MS};
pub use measures::MeasurementBuffer;
pub use registry::SensorRegistry;
pub use sensor::{value_to_display_string, Sensor};
pub use source_adapter::{BoxedSourceAdapter, SourceAdapter};

// Re-export types used in public signatures for convenience
pub use hwsens_types::{Color, Measurement, SensorError, SensorResult, SensorType, Timestamp, UNKNOWN};
