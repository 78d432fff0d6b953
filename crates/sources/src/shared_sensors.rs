//! Shared temperature components cache
//!
//! A single `sysinfo::Components` instance is built on first use and shared
//! by every adapter that reads chip temperatures, so the expensive sensor
//! enumeration happens once per process.

use once_cell::sync::Lazy;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use sysinfo::Components;

/// Minimum interval between component refreshes
const MIN_REFRESH_INTERVAL: Duration = Duration::from_millis(250);

struct SharedSensors {
    components: Components,
    last_refresh: Instant,
}

impl SharedSensors {
    fn new() -> Self {
        Self {
            components: Components::new_with_refreshed_list(),
            last_refresh: Instant::now(),
        }
    }

    fn refresh_if_needed(&mut self) {
        if self.last_refresh.elapsed() >= MIN_REFRESH_INTERVAL {
            self.components.refresh();
            self.last_refresh = Instant::now();
        }
    }
}

static SHARED_COMPONENTS: Lazy<Mutex<SharedSensors>> = Lazy::new(|| {
    log::info!("Enumerating temperature components");
    let sensors = SharedSensors::new();
    log::info!("Found {} temperature components", sensors.components.len());
    Mutex::new(sensors)
});

/// Current readings as (label, degrees Celsius), in enumeration order.
///
/// Readings are refreshed at most every 250 ms.
pub fn get_refreshed_temperatures() -> Vec<(String, f32)> {
    // A poisoned lock still holds usable component data
    let mut sensors = SHARED_COMPONENTS.lock().unwrap_or_else(|poisoned| {
        log::warn!("Shared sensors mutex was poisoned, recovering");
        poisoned.into_inner()
    });
    sensors.refresh_if_needed();
    sensors
        .components
        .iter()
        .map(|c| (c.label().to_string(), c.temperature()))
        .collect()
}

/// Force the one-time enumeration, e.g. before the first refresh tick
pub fn initialize() {
    let _ = &*SHARED_COMPONENTS;
}
