//! hwsens-sources: Source adapters for the hwsens sensor history engine.

mod disk_temp;
mod hwmon;
mod shared_sensors;
mod simulated;
mod sysfs;

pub use disk_temp::DiskTempSource;
pub use hwmon::{HwmonSource, TemperatureReader};
pub use simulated::{SimulatedChannel, SimulatedSource, Waveform};
pub use sysfs::HWMON_ROOT;

use hwsens_core::{BoxedSourceAdapter, SensorError, SensorRegistry, SensorResult};

/// Initialize shared sensor caches (call once at startup)
pub fn initialize_sensors() {
    shared_sensors::initialize();
}

/// Adapters probing the local machine
pub fn default_adapters() -> Vec<BoxedSourceAdapter> {
    vec![Box::new(HwmonSource::new()), Box::new(DiskTempSource::new())]
}

/// Build the registry from every available adapter, in adapter order.
///
/// Adapters that are unavailable or fail discovery contribute nothing;
/// duplicate ids across adapters are dropped with a warning. Finding no
/// sensor at all gives an empty registry.
pub fn discover_all(
    adapters: &mut [BoxedSourceAdapter],
    buffer_capacity: usize,
) -> SensorResult<SensorRegistry> {
    if buffer_capacity == 0 {
        return Err(SensorError::invalid_capacity(buffer_capacity));
    }

    let mut registry = SensorRegistry::new();

    for adapter in adapters.iter_mut() {
        if !adapter.is_available() {
            log::info!("Source {} is not available on this system", adapter.name());
            continue;
        }

        match adapter.list_sensors(buffer_capacity) {
            Ok(sensors) => {
                let added = registry.extend(sensors);
                log::info!("Source {}: {} sensors", adapter.name(), added);
            }
            Err(e) => log::warn!("Sensor discovery failed for {}: {:#}", adapter.name(), e),
        }
    }

    log::info!("Sensor discovery complete: {} sensors", registry.len());
    Ok(registry)
}
