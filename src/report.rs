//! Plain-text rendering of sensor state for the command line

use hwsens_core::{value_to_display_string, Sensor, SensorRegistry, SensorType};

const NOT_AVAILABLE: &str = "N/A";

fn display(sensor_type: SensorType, value: Option<f64>) -> String {
    value
        .map(|v| value_to_display_string(sensor_type, v))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// One line per sensor: name, current value, lifetime min/max, alarm marker
pub fn format_sensor_line(sensor: &Sensor) -> String {
    let sensor_type = sensor.sensor_type();
    let mut line = format!(
        "{:<28} {:>7}  (min {:>6}, max {:>6})",
        sensor.name(),
        display(sensor_type, sensor.current_value()),
        display(sensor_type, sensor.min()),
        display(sensor_type, sensor.max()),
    );
    if sensor.alarm_raised() {
        line.push_str("  ALARM");
    }
    line
}

/// Enabled sensors followed by the window extrema over all of them
pub fn format_summary(registry: &SensorRegistry) -> String {
    let mut out = String::new();
    for sensor in registry.iter().filter(|s| s.is_enabled()) {
        out.push_str(&format_sensor_line(sensor));
        out.push('\n');
    }

    if registry.contains_type(SensorType::TEMP) {
        out.push_str(&format!(
            "Temperatures: {} .. {}\n",
            display(SensorType::TEMP, registry.min_temp()),
            display(SensorType::TEMP, registry.max_temp()),
        ));
    }
    if registry.contains_type(SensorType::FAN) {
        out.push_str(&format!(
            "Fans: {} .. {} RPM\n",
            display(SensorType::FAN, registry.min_rpm()),
            display(SensorType::FAN, registry.max_rpm()),
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_sensor_line() {
        let mut sensor = Sensor::new("cpu", "CPU", SensorType::LMSENSOR_TEMP, 4).unwrap();
        assert_eq!(
            format_sensor_line(&sensor),
            format!("{:<28} {:>7}  (min {:>6}, max {:>6})", "CPU", "N/A", "N/A", "N/A")
        );

        sensor.set_alarm_limit(50.0);
        sensor.set_alarm_enabled(true);
        sensor.set_current_measure(Some(42.4), Utc::now());
        sensor.set_current_measure(Some(61.6), Utc::now());

        let line = format_sensor_line(&sensor);
        assert!(line.starts_with("CPU "));
        assert!(line.contains("62C"));
        assert!(line.contains("min    42C"));
        assert!(line.ends_with("ALARM"));
    }

    #[test]
    fn test_summary_skips_disabled_and_reports_extrema() {
        let mut registry = SensorRegistry::new();
        let mut cpu = Sensor::new("cpu", "CPU", SensorType::LMSENSOR_TEMP, 4).unwrap();
        cpu.set_current_measure(Some(45.0), Utc::now());
        let mut fan = Sensor::new("fan", "Fan", SensorType::LMSENSOR_FAN, 4).unwrap();
        fan.set_current_measure(Some(900.0), Utc::now());
        let mut off = Sensor::new("off", "Off", SensorType::HDD_TEMP, 4).unwrap();
        off.set_enabled(false);
        registry.extend([cpu, fan, off]);

        let summary = format_summary(&registry);
        assert!(summary.contains("CPU"));
        assert!(!summary.contains("Off"));
        assert!(summary.contains("Temperatures: 45C .. 45C"));
        assert!(summary.contains("Fans: 900 .. 900 RPM"));
    }

    #[test]
    fn test_empty_registry_summary() {
        assert_eq!(format_summary(&SensorRegistry::new()), "");
    }
}
