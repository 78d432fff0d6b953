//! Application and per-sensor configuration

use anyhow::{Context, Result};
use hwsens_core::{
    Color, SensorError, SensorRegistry, SensorResult, DEFAULT_BUFFER_LENGTH,
    DEFAULT_UPDATE_INTERVAL_MS,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Application-wide configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Version of the config format
    pub version: u32,
    /// Samples kept per sensor
    #[serde(default = "default_buffer_length")]
    pub buffer_length: usize,
    /// Refresh period in milliseconds
    #[serde(default = "default_update_interval")]
    pub update_interval_ms: u64,
    /// Alarm settings applied to every temperature sensor
    #[serde(default)]
    pub alarm_defaults: AlarmDefaults,
    /// Per-sensor overrides, matched by sensor id
    #[serde(default)]
    pub sensors: Vec<SensorSettings>,
}

fn default_buffer_length() -> usize {
    DEFAULT_BUFFER_LENGTH
}

fn default_update_interval() -> u64 {
    DEFAULT_UPDATE_INTERVAL_MS
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: 1,
            buffer_length: default_buffer_length(),
            update_interval_ms: default_update_interval(),
            alarm_defaults: AlarmDefaults::default(),
            sensors: Vec::new(),
        }
    }
}

/// Default temperature alarm
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AlarmDefaults {
    #[serde(default = "default_alarm_limit")]
    pub limit: f64,
    #[serde(default)]
    pub enabled: bool,
}

fn default_alarm_limit() -> f64 {
    60.0
}

impl Default for AlarmDefaults {
    fn default() -> Self {
        Self {
            limit: default_alarm_limit(),
            enabled: false,
        }
    }
}

/// Overrides for one sensor. Unset fields keep the sensor's current value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SensorSettings {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alarm_limit: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alarm_enabled: Option<bool>,
    /// Graph color as "#rrggbb"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl AppConfig {
    /// Load configuration from the default location, or defaults if absent
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            return Ok(Self::default());
        }

        Self::load_from_path(&config_path)
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;
        self.save_to_path(&config_path)
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("org", "hwsens", "hwsens")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(dirs.config_dir().join("config.json"))
    }

    /// Load configuration from a specific file path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Invalid configuration in {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a specific file path
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> SensorResult<()> {
        if self.buffer_length == 0 {
            return Err(SensorError::invalid_capacity(self.buffer_length));
        }
        if self.update_interval_ms == 0 {
            return Err(SensorError::Config(
                "update interval must be at least 1 ms".to_string(),
            ));
        }
        Ok(())
    }

    pub fn update_interval(&self) -> Duration {
        Duration::from_millis(self.update_interval_ms)
    }

    pub fn settings_for(&self, id: &str) -> Option<&SensorSettings> {
        self.sensors.iter().find(|s| s.id == id)
    }

    /// Push the configuration into discovered sensors.
    ///
    /// Every history is resized to `buffer_length`, temperature sensors get
    /// the default alarm, then per-sensor overrides are applied. Overrides
    /// naming an unknown sensor are ignored.
    pub fn apply(&self, registry: &mut SensorRegistry) -> SensorResult<()> {
        self.validate()?;
        registry.resize_all(self.buffer_length)?;

        for sensor in registry.iter_mut().filter(|s| s.is_temperature()) {
            sensor.set_alarm_limit(self.alarm_defaults.limit);
            sensor.set_alarm_enabled(self.alarm_defaults.enabled);
        }

        for settings in &self.sensors {
            let Some(sensor) = registry.get_by_id_mut(&settings.id) else {
                log::debug!("No sensor {} on this system, ignoring its settings", settings.id);
                continue;
            };

            if let Some(name) = &settings.name {
                sensor.set_name(name.clone());
            }
            if let Some(enabled) = settings.enabled {
                sensor.set_enabled(enabled);
            }
            if let Some(limit) = settings.alarm_limit {
                sensor.set_alarm_limit(limit);
            }
            if let Some(enabled) = settings.alarm_enabled {
                sensor.set_alarm_enabled(enabled);
            }
            if let Some(hex) = &settings.color {
                match Color::from_hex(hex) {
                    Some(color) => sensor.set_color(Some(color)),
                    None => log::warn!("Ignoring invalid color {:?} for {}", hex, settings.id),
                }
            }
        }

        Ok(())
    }
}
