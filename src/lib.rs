//! hwsens: hardware sensor history, min/max tracking and threshold alarms
//!
//! This library ties the engine crates together:
//! - `hwsens-core` keeps per-sensor histories, extrema and alarms
//! - `hwsens-sources` discovers and refreshes hardware sensors
//! - `config` loads user settings and applies them to discovered sensors
//! - `core::UpdateManager` refreshes everything on a fixed period

pub mod config;
pub mod core;
pub mod report;

// Re-export commonly used types
pub use config::{AppConfig, SensorSettings};
pub use core::{SharedRegistry, UpdateManager};
pub use hwsens_core::{Sensor, SensorError, SensorRegistry, SensorType, SourceAdapter};
