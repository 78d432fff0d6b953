//! Simulated sensors for demos and testing
//!
//! Values follow deterministic waveforms indexed by refresh count, so a
//! run is reproducible regardless of timing.

use anyhow::Result;
use hwsens_core::{Color, Sensor, SensorRegistry, SensorType, SourceAdapter};

/// Value generator for one simulated sensor
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Waveform {
    /// Always the same value
    Constant(f64),
    /// Linear ramp from `min` towards `max`, restarting every `period` ticks
    Sawtooth { min: f64, max: f64, period: u64 },
    /// `low` for `half_period` ticks, then `high` for `half_period` ticks
    Square { low: f64, high: f64, half_period: u64 },
    /// `value`, except every `every`-th tick which yields no reading
    Dropout { value: f64, every: u64 },
}

impl Waveform {
    /// Reading at refresh number `tick` (starting at 0)
    pub fn sample(&self, tick: u64) -> Option<f64> {
        match *self {
            Waveform::Constant(value) => Some(value),
            Waveform::Sawtooth { min, max, period } => {
                let period = period.max(1);
                let phase = (tick % period) as f64 / period as f64;
                Some(min + (max - min) * phase)
            }
            Waveform::Square {
                low,
                high,
                half_period,
            } => {
                if (tick / half_period.max(1)) % 2 == 0 {
                    Some(low)
                } else {
                    Some(high)
                }
            }
            Waveform::Dropout { value, every } => {
                let every = every.max(1);
                if tick % every == every - 1 {
                    None
                } else {
                    Some(value)
                }
            }
        }
    }
}

/// One simulated sensor
#[derive(Debug, Clone)]
pub struct SimulatedChannel {
    pub id: String,
    pub name: String,
    pub sensor_type: SensorType,
    pub waveform: Waveform,
}

impl SimulatedChannel {
    pub fn new(id: &str, name: &str, sensor_type: SensorType, waveform: Waveform) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            sensor_type,
            waveform,
        }
    }
}

/// Adapter producing waveform readings instead of probing hardware
pub struct SimulatedSource {
    channels: Vec<SimulatedChannel>,
    tick: u64,
}

impl Default for SimulatedSource {
    fn default() -> Self {
        Self::demo()
    }
}

impl SimulatedSource {
    pub fn new(channels: Vec<SimulatedChannel>) -> Self {
        Self { channels, tick: 0 }
    }

    /// A CPU temperature ramp, a pulsing fan and a drive that drops readings
    pub fn demo() -> Self {
        let remote_temp = SensorType::REMOTE | SensorType::TEMP;
        Self::new(vec![
            SimulatedChannel::new(
                "sim cpu",
                "Simulated CPU",
                remote_temp,
                Waveform::Sawtooth {
                    min: 35.0,
                    max: 85.0,
                    period: 20,
                },
            ),
            SimulatedChannel::new(
                "sim fan",
                "Simulated Fan",
                SensorType::REMOTE | SensorType::FAN,
                Waveform::Square {
                    low: 800.0,
                    high: 1600.0,
                    half_period: 5,
                },
            ),
            SimulatedChannel::new(
                "sim disk",
                "Simulated Disk",
                remote_temp,
                Waveform::Dropout {
                    value: 38.0,
                    every: 7,
                },
            ),
        ])
    }

    /// Number of refreshes performed so far
    pub fn ticks(&self) -> u64 {
        self.tick
    }
}

impl SourceAdapter for SimulatedSource {
    fn name(&self) -> &str {
        "simulated"
    }

    fn list_sensors(&mut self, buffer_capacity: usize) -> Result<Vec<Sensor>> {
        let mut sensors = Vec::with_capacity(self.channels.len());
        for (index, channel) in self.channels.iter().enumerate() {
            let mut sensor = Sensor::new(
                channel.id.clone(),
                channel.name.clone(),
                channel.sensor_type,
                buffer_capacity,
            )?;
            sensor.set_color(Some(Color::palette(index)));
            sensor.set_url(Some(format!("simulated://{}", channel.id.replace(' ', "/"))));
            sensors.push(sensor);
        }
        Ok(sensors)
    }

    fn refresh(&mut self, registry: &mut SensorRegistry) -> Result<()> {
        for channel in &self.channels {
            if let Some(sensor) = registry.get_by_id_mut(&channel.id) {
                sensor.set_current_value(channel.waveform.sample(self.tick));
            }
        }
        self.tick += 1;
        Ok(())
    }
}
