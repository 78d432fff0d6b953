//! Helpers for reading hwmon attributes from sysfs

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Default hwmon class directory
pub const HWMON_ROOT: &str = "/sys/class/hwmon";

/// Read a numeric attribute such as `fan1_input`
pub fn read_value(path: &Path) -> Result<f64> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    raw.trim()
        .parse::<f64>()
        .with_context(|| format!("Invalid value {:?} in {}", raw.trim(), path.display()))
}

/// Read a text attribute, trimmed. `None` when missing or empty.
pub fn read_label(path: &Path) -> Option<String> {
    let label = std::fs::read_to_string(path).ok()?;
    let label = label.trim();
    if label.is_empty() {
        None
    } else {
        Some(label.to_string())
    }
}

/// One `*_input` attribute backing a sensor
#[derive(Debug, Clone)]
pub struct SysfsChannel {
    /// Id of the sensor fed by this attribute
    pub id: String,
    pub path: PathBuf,
    /// Raw attribute units per sensor unit
    pub divisor: f64,
}

impl SysfsChannel {
    /// Current reading, `None` when the attribute cannot be read
    pub fn read(&self) -> Option<f64> {
        match read_value(&self.path) {
            Ok(raw) => Some(raw / self.divisor),
            Err(e) => {
                log::debug!("Sensor {}: {:#}", self.id, e);
                None
            }
        }
    }
}

/// Chip directories under `root`, sorted so discovery order is stable
pub fn chip_dirs(root: &Path) -> Vec<PathBuf> {
    let mut dirs: Vec<PathBuf> = match std::fs::read_dir(root) {
        Ok(entries) => entries.flatten().map(|e| e.path()).collect(),
        Err(e) => {
            log::debug!("Cannot list {}: {}", root.display(), e);
            return Vec::new();
        }
    };
    dirs.sort();
    dirs
}

/// Channel numbers of `<prefix><n>_input` files in a chip directory, sorted
pub fn input_channels(chip_dir: &Path, prefix: &str) -> Vec<u32> {
    let mut channels: Vec<u32> = match std::fs::read_dir(chip_dir) {
        Ok(entries) => entries
            .flatten()
            .filter_map(|e| {
                let filename = e.file_name();
                let filename = filename.to_string_lossy();
                filename
                    .strip_prefix(prefix)?
                    .strip_suffix("_input")?
                    .parse()
                    .ok()
            })
            .collect(),
        Err(_) => Vec::new(),
    };
    channels.sort_unstable();
    channels
}

/// Short chip name: the `name` attribute, or the directory name
pub fn chip_name(chip_dir: &Path) -> String {
    read_label(&chip_dir.join("name")).unwrap_or_else(|| {
        chip_dir
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "hwmon".to_string())
    })
}
