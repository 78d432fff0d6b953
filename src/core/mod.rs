//! Runtime pieces built on top of the sensor engine

mod update_manager;

pub use update_manager::{SharedRegistry, UpdateManager};
