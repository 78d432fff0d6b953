//! Configuration management

mod settings;

pub use settings::{AlarmDefaults, AppConfig, SensorSettings};
