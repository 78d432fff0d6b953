//! Sensor: identity, history, lifetime extrema and alarm

use crate::alarm::{AlarmCallback, AlarmEvaluator};
use crate::measures::MeasurementBuffer;
use hwsens_types::{
    capture_timestamp, cleared_timestamp, Color, Measurement, SensorResult, SensorType, Timestamp,
};
use std::fmt;

/// Render a concrete value for display: rounded to an integer, followed
/// by "C" for temperatures and nothing otherwise.
pub fn value_to_display_string(sensor_type: SensorType, value: f64) -> String {
    format!("{:.0}{}", value, sensor_type.unit())
}

/// A single hardware sensor and its recent history.
///
/// `min` and `max` track every reading ever pushed, independently of the
/// buffer window, and only ever widen.
pub struct Sensor {
    id: String,
    name: String,
    sensor_type: SensorType,
    enabled: bool,
    measures: MeasurementBuffer,
    min: Option<f64>,
    max: Option<f64>,
    alarm: AlarmEvaluator,
    on_alarm_raised: Option<AlarmCallback>,
    color: Option<Color>,
    url: Option<String>,
}

impl Sensor {
    /// Create an enabled sensor with an empty history of `buffer_capacity`
    /// slots, no extrema and a disabled alarm.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        sensor_type: SensorType,
        buffer_capacity: usize,
    ) -> SensorResult<Self> {
        Ok(Self {
            id: id.into(),
            name: name.into(),
            sensor_type,
            enabled: true,
            measures: MeasurementBuffer::new(buffer_capacity)?,
            min: None,
            max: None,
            alarm: AlarmEvaluator::default(),
            on_alarm_raised: None,
            color: None,
            url: None,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn sensor_type(&self) -> SensorType {
        self.sensor_type
    }

    pub fn is_temperature(&self) -> bool {
        self.sensor_type.is_temperature()
    }

    pub fn is_fan(&self) -> bool {
        self.sensor_type.is_fan()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Record a reading taken now.
    ///
    /// A failing clock does not fail the call: the sample is stored with a
    /// cleared timestamp instead.
    pub fn set_current_value(&mut self, value: Option<f64>) {
        self.set_current_value_stamped(value, capture_timestamp());
    }

    fn set_current_value_stamped(&mut self, value: Option<f64>, captured: SensorResult<Timestamp>) {
        let timestamp = captured.unwrap_or_else(|e| {
            log::debug!("Sensor {}: {}, storing sample without timestamp", self.id, e);
            cleared_timestamp()
        });
        self.set_current_measure(value, timestamp);
    }

    /// Record a reading with an explicit capture time.
    ///
    /// Pushes into the history, widens the lifetime extrema and runs the
    /// alarm detector. An alarm callback runs inline before this returns.
    /// An `UNKNOWN` value leaves the alarm state as it was, so a dropped
    /// reading never re-arms a raised alarm.
    pub fn set_current_measure(&mut self, value: Option<f64>, timestamp: Timestamp) {
        let measurement = Measurement::new(value, timestamp);
        self.measures.push_measurement(measurement);

        if let Some(v) = measurement.value {
            if self.min.map_or(true, |min| v < min) {
                self.min = Some(v);
            }
            if self.max.map_or(true, |max| v > max) {
                self.max = Some(v);
            }
        }

        if self.alarm.evaluate(measurement.value) {
            log::debug!("Sensor {} crossed alarm limit {}", self.id, self.alarm.limit());
            self.dispatch_alarm();
        }
    }

    fn dispatch_alarm(&mut self) {
        if let Some(mut callback) = self.on_alarm_raised.take() {
            callback(self);
            self.on_alarm_raised = Some(callback);
        }
    }

    /// Newest value, `None` when the newest slot is `UNKNOWN`
    pub fn current_value(&self) -> Option<f64> {
        self.measures.current().ok().and_then(|m| m.value)
    }

    pub fn current_measure(&self) -> SensorResult<&Measurement> {
        self.measures.current()
    }

    pub fn measures(&self) -> &MeasurementBuffer {
        &self.measures
    }

    pub fn buffer_capacity(&self) -> usize {
        self.measures.capacity()
    }

    /// Change the history length, with the buffer's resize rules even when
    /// the capacity is unchanged. Lifetime extrema are kept.
    pub fn resize(&mut self, new_capacity: usize) -> SensorResult<()> {
        self.measures.resize(new_capacity)
    }

    /// Lowest reading ever recorded
    pub fn min(&self) -> Option<f64> {
        self.min
    }

    /// Highest reading ever recorded
    pub fn max(&self) -> Option<f64> {
        self.max
    }

    pub fn value_to_display_string(&self, value: f64) -> String {
        value_to_display_string(self.sensor_type, value)
    }

    pub fn alarm(&self) -> &AlarmEvaluator {
        &self.alarm
    }

    pub fn alarm_limit(&self) -> f64 {
        self.alarm.limit()
    }

    pub fn set_alarm_limit(&mut self, limit: f64) {
        self.alarm.set_limit(limit);
    }

    pub fn is_alarm_enabled(&self) -> bool {
        self.alarm.is_enabled()
    }

    pub fn set_alarm_enabled(&mut self, enabled: bool) {
        self.alarm.set_enabled(enabled);
    }

    pub fn alarm_raised(&self) -> bool {
        self.alarm.is_raised()
    }

    /// Install the alarm callback, replacing any previous one.
    ///
    /// Whatever the callback needs beyond the sensor goes in its captures.
    pub fn set_on_alarm_raised<F>(&mut self, callback: F)
    where
        F: FnMut(&Sensor) + Send + 'static,
    {
        self.on_alarm_raised = Some(Box::new(callback));
    }

    pub fn clear_on_alarm_raised(&mut self) {
        self.on_alarm_raised = None;
    }

    pub fn color(&self) -> Option<Color> {
        self.color
    }

    pub fn set_color(&mut self, color: Option<Color>) {
        self.color = color;
    }

    /// Origin of a remote sensor's data
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn set_url(&mut self, url: Option<String>) {
        self.url = url;
    }
}

impl fmt::Debug for Sensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sensor")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("sensor_type", &self.sensor_type)
            .field("enabled", &self.enabled)
            .field("capacity", &self.measures.capacity())
            .field("min", &self.min)
            .field("max", &self.max)
            .field("alarm", &self.alarm)
            .field("has_alarm_callback", &self.on_alarm_raised.is_some())
            .finish()
    }
}
