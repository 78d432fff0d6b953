//! Motherboard and CPU chip sensors
//!
//! Temperatures come from the shared `sysinfo` components; fan speeds are
//! read from `fan*_input` attributes of every hwmon chip.

use crate::shared_sensors;
use crate::sysfs::{self, SysfsChannel, HWMON_ROOT};
use anyhow::Result;
use hwsens_core::{Sensor, SensorRegistry, SensorType, SourceAdapter};
use std::collections::HashMap;
use std::path::PathBuf;

/// Supplies (label, degrees Celsius) pairs in a stable order
pub type TemperatureReader = fn() -> Vec<(String, f32)>;

struct TempChannel {
    id: String,
    label: String,
    /// 1 for the first component with this label, 2 for the second...
    occurrence: usize,
}

/// Pair each reading with how many times its label has been seen so far
fn with_occurrences(readings: Vec<(String, f32)>) -> Vec<(String, usize, f32)> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    readings
        .into_iter()
        .map(|(label, temp)| {
            let count = seen.entry(label.clone()).or_insert(0);
            *count += 1;
            (label, *count, temp)
        })
        .collect()
}

/// Chip temperature and fan adapter
pub struct HwmonSource {
    root: PathBuf,
    read_temperatures: TemperatureReader,
    temps: Vec<TempChannel>,
    fans: Vec<SysfsChannel>,
}

impl Default for HwmonSource {
    fn default() -> Self {
        Self::new()
    }
}

impl HwmonSource {
    pub fn new() -> Self {
        Self::with_probes(HWMON_ROOT, shared_sensors::get_refreshed_temperatures)
    }

    /// Adapter reading fans below `root` and temperatures from `read_temperatures`
    pub fn with_probes(root: impl Into<PathBuf>, read_temperatures: TemperatureReader) -> Self {
        Self {
            root: root.into(),
            read_temperatures,
            temps: Vec::new(),
            fans: Vec::new(),
        }
    }

    fn discover_temperatures(&mut self, buffer_capacity: usize) -> Result<Vec<Sensor>> {
        let readings = with_occurrences((self.read_temperatures)());
        let mut sensors = Vec::with_capacity(readings.len());

        for (label, occurrence, temp) in readings {
            // Labels are not unique across chips
            let id = if occurrence == 1 {
                format!("lmsensor {}", label)
            } else {
                format!("lmsensor {} #{}", label, occurrence)
            };

            log::info!("  {} = {:.1}C", id, temp);
            sensors.push(Sensor::new(
                id.clone(),
                label.clone(),
                SensorType::LMSENSOR_TEMP,
                buffer_capacity,
            )?);
            self.temps.push(TempChannel {
                id,
                label,
                occurrence,
            });
        }

        Ok(sensors)
    }

    fn discover_fans(&mut self, buffer_capacity: usize) -> Result<Vec<Sensor>> {
        let mut sensors = Vec::new();

        for chip_dir in sysfs::chip_dirs(&self.root) {
            let chip = sysfs::chip_name(&chip_dir);
            let dir_name = chip_dir
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();

            for n in sysfs::input_channels(&chip_dir, "fan") {
                let label = sysfs::read_label(&chip_dir.join(format!("fan{}_label", n)))
                    .unwrap_or_else(|| format!("{} Fan {}", chip, n));
                let channel = SysfsChannel {
                    id: format!("lmsensor {} {} fan{}", chip, dir_name, n),
                    path: chip_dir.join(format!("fan{}_input", n)),
                    divisor: 1.0,
                };

                match channel.read() {
                    Some(rpm) => log::info!("  {} = {} RPM ({})", label, rpm, channel.path.display()),
                    None => log::info!("  {} (no reading yet)", label),
                }

                sensors.push(Sensor::new(
                    channel.id.clone(),
                    label,
                    SensorType::LMSENSOR_FAN,
                    buffer_capacity,
                )?);
                self.fans.push(channel);
            }
        }

        Ok(sensors)
    }
}

impl SourceAdapter for HwmonSource {
    fn name(&self) -> &str {
        "lmsensor"
    }

    fn list_sensors(&mut self, buffer_capacity: usize) -> Result<Vec<Sensor>> {
        self.temps.clear();
        self.fans.clear();

        log::info!("Scanning chip sensors");
        let mut sensors = self.discover_temperatures(buffer_capacity)?;
        sensors.extend(self.discover_fans(buffer_capacity)?);
        log::info!(
            "Chip sensors: {} temperatures, {} fans",
            self.temps.len(),
            self.fans.len()
        );

        Ok(sensors)
    }

    fn refresh(&mut self, registry: &mut SensorRegistry) -> Result<()> {
        if !self.temps.is_empty() {
            let readings = with_occurrences((self.read_temperatures)());
            for channel in &self.temps {
                let value = readings
                    .iter()
                    .find(|(label, occurrence, _)| {
                        *label == channel.label && *occurrence == channel.occurrence
                    })
                    .map(|(_, _, t)| *t as f64);
                if let Some(sensor) = registry.get_by_id_mut(&channel.id) {
                    sensor.set_current_value(value);
                }
            }
        }

        for channel in &self.fans {
            if let Some(sensor) = registry.get_by_id_mut(&channel.id) {
                sensor.set_current_value(channel.read());
            }
        }

        Ok(())
    }
}
