//! Disk temperatures from the `drivetemp` and `nvme` hwmon drivers

use crate::sysfs::{self, SysfsChannel, HWMON_ROOT};
use anyhow::Result;
use hwsens_core::{Sensor, SensorRegistry, SensorType, SourceAdapter};
use std::path::{Path, PathBuf};

/// hwmon chip names that report drive temperatures
const DRIVE_CHIPS: [&str; 2] = ["drivetemp", "nvme"];

/// hwmon reports millidegrees Celsius
const MILLIDEGREES_PER_DEGREE: f64 = 1000.0;

/// Disk temperature adapter
pub struct DiskTempSource {
    root: PathBuf,
    channels: Vec<SysfsChannel>,
}

impl Default for DiskTempSource {
    fn default() -> Self {
        Self::new()
    }
}

impl DiskTempSource {
    pub fn new() -> Self {
        Self::with_root(HWMON_ROOT)
    }

    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            channels: Vec::new(),
        }
    }
}

/// Drive model if the driver exposes it, else "<chip> <hwmonN>"
fn drive_name(chip_dir: &Path, chip: &str) -> String {
    sysfs::read_label(&chip_dir.join("device").join("model")).unwrap_or_else(|| {
        let dir_name = chip_dir
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        format!("{} {}", chip, dir_name)
    })
}

impl SourceAdapter for DiskTempSource {
    fn name(&self) -> &str {
        "hdd"
    }

    fn list_sensors(&mut self, buffer_capacity: usize) -> Result<Vec<Sensor>> {
        self.channels.clear();
        let mut sensors = Vec::new();

        log::info!("Scanning drive temperature sensors");

        for chip_dir in sysfs::chip_dirs(&self.root) {
            let chip = sysfs::chip_name(&chip_dir);
            if !DRIVE_CHIPS.contains(&chip.as_str()) {
                continue;
            }

            let drive = drive_name(&chip_dir, &chip);
            let dir_name = chip_dir
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            let inputs = sysfs::input_channels(&chip_dir, "temp");
            let several = inputs.len() > 1;

            for n in inputs {
                let name = match sysfs::read_label(&chip_dir.join(format!("temp{}_label", n))) {
                    Some(label) => format!("{} {}", drive, label),
                    None if several => format!("{} temp{}", drive, n),
                    None => drive.clone(),
                };
                let channel = SysfsChannel {
                    id: format!("hdd {} temp{}", dir_name, n),
                    path: chip_dir.join(format!("temp{}_input", n)),
                    divisor: MILLIDEGREES_PER_DEGREE,
                };

                log::info!("  {} ({})", name, channel.path.display());
                sensors.push(Sensor::new(
                    channel.id.clone(),
                    name,
                    SensorType::HDD_TEMP,
                    buffer_capacity,
                )?);
                self.channels.push(channel);
            }
        }

        log::info!("Drive temperature sensors: {}", self.channels.len());
        Ok(sensors)
    }

    fn refresh(&mut self, registry: &mut SensorRegistry) -> Result<()> {
        for channel in &self.channels {
            if let Some(sensor) = registry.get_by_id_mut(&channel.id) {
                sensor.set_current_value(channel.read());
            }
        }
        Ok(())
    }

    fn is_available(&self) -> bool {
        self.root.is_dir()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sysfs::testutil::{scratch_dir, write};

    fn fake_root(name: &str) -> PathBuf {
        let root = scratch_dir(name);
        write(&root.join("hwmon0"), "name", "k10temp\n");
        write(&root.join("hwmon0"), "temp1_input", "51000\n");

        let sata = root.join("hwmon3");
        write(&sata, "name", "drivetemp\n");
        write(&sata, "temp1_input", "34000\n");
        write(&sata.join("device"), "model", "WDC WD40EFRX-68N\n");

        let nvme = root.join("hwmon4");
        write(&nvme, "name", "nvme\n");
        write(&nvme, "temp1_input", "41850\n");
        write(&nvme, "temp1_label", "Composite\n");
        write(&nvme, "temp2_input", "45850\n");
        root
    }

    #[test]
    fn test_only_drive_chips_are_listed() {
        let mut source = DiskTempSource::with_root(fake_root("disk-list"));
        assert!(source.is_available());

        let sensors = source.list_sensors(4).unwrap();
        let names: Vec<(&str, &str)> = sensors.iter().map(|s| (s.id(), s.name())).collect();
        assert_eq!(
            names,
            vec![
                ("hdd hwmon3 temp1", "WDC WD40EFRX-68N"),
                ("hdd hwmon4 temp1", "nvme hwmon4 Composite"),
                ("hdd hwmon4 temp2", "nvme hwmon4 temp2"),
            ]
        );
        assert!(sensors.iter().all(|s| s.sensor_type() == SensorType::HDD_TEMP));
    }

    #[test]
    fn test_refresh_converts_millidegrees() {
        let mut source = DiskTempSource::with_root(fake_root("disk-refresh"));
        let mut registry = SensorRegistry::new();
        registry.extend(source.list_sensors(4).unwrap());

        source.refresh(&mut registry).unwrap();

        let sata = registry.get_by_id("hdd hwmon3 temp1").unwrap();
        assert_eq!(sata.current_value(), Some(34.0));
        assert_eq!(sata.value_to_display_string(34.0), "34C");
        assert_eq!(registry.max_of_type(SensorType::HDD), Some(45.85));
    }

    #[test]
    fn test_unavailable_without_hwmon() {
        let source = DiskTempSource::with_root("/nonexistent/hwmon");
        assert!(!source.is_available());
    }
}
