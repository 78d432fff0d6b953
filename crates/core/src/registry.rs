//! Ordered collection of sensors keyed by identifier

use crate::sensor::Sensor;
use crate::source_adapter::BoxedSourceAdapter;
use hwsens_types::{SensorError, SensorResult, SensorType};

/// Every sensor known to the application, in discovery order.
///
/// Identifiers are unique: `add` refuses a sensor whose id is already
/// present. An empty registry is simply a registry with no sensors.
#[derive(Debug, Default)]
pub struct SensorRegistry {
    sensors: Vec<Sensor>,
}

impl SensorRegistry {
    pub fn new() -> Self {
        Self {
            sensors: Vec::new(),
        }
    }

    /// Number of sensors
    pub fn len(&self) -> usize {
        self.sensors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sensors.is_empty()
    }

    /// True if any sensor's type shares a bit with `mask`
    pub fn contains_type(&self, mask: SensorType) -> bool {
        self.sensors
            .iter()
            .any(|s| s.sensor_type().intersects(mask))
    }

    /// Append a sensor and return the new size.
    ///
    /// Fails without modifying the registry when the id is taken.
    pub fn add(&mut self, sensor: Sensor) -> SensorResult<usize> {
        if self.get_by_id(sensor.id()).is_some() {
            return Err(SensorError::DuplicateId(sensor.id().to_string()));
        }
        self.sensors.push(sensor);
        Ok(self.sensors.len())
    }

    /// Add a batch of sensors, skipping duplicates. Returns how many were added.
    pub fn extend<I>(&mut self, sensors: I) -> usize
    where
        I: IntoIterator<Item = Sensor>,
    {
        let mut added = 0;
        for sensor in sensors {
            match self.add(sensor) {
                Ok(_) => added += 1,
                Err(e) => log::warn!("Skipping sensor: {}", e),
            }
        }
        added
    }

    pub fn get_by_id(&self, id: &str) -> Option<&Sensor> {
        self.sensors.iter().find(|s| s.id() == id)
    }

    pub fn get_by_id_mut(&mut self, id: &str) -> Option<&mut Sensor> {
        self.sensors.iter_mut().find(|s| s.id() == id)
    }

    /// Take a sensor out of the registry, keeping the order of the others
    pub fn remove(&mut self, id: &str) -> Option<Sensor> {
        let index = self.sensors.iter().position(|s| s.id() == id)?;
        Some(self.sensors.remove(index))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sensor> {
        self.sensors.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Sensor> {
        self.sensors.iter_mut()
    }

    /// Lowest reading currently held in the buffers of enabled sensors
    /// matching `mask`.
    ///
    /// Unlike `Sensor::min`, this only looks at the samples still in each
    /// history window.
    pub fn min_of_type(&self, mask: SensorType) -> Option<f64> {
        self.window_values(mask).reduce(f64::min)
    }

    /// Highest reading currently held in the buffers of enabled sensors
    /// matching `mask`.
    pub fn max_of_type(&self, mask: SensorType) -> Option<f64> {
        self.window_values(mask).reduce(f64::max)
    }

    fn window_values(&self, mask: SensorType) -> impl Iterator<Item = f64> + '_ {
        self.sensors
            .iter()
            .filter(move |s| s.is_enabled() && s.sensor_type().intersects(mask))
            .flat_map(|s| s.measures().known_values())
    }

    pub fn min_temp(&self) -> Option<f64> {
        self.min_of_type(SensorType::TEMP)
    }

    pub fn max_temp(&self) -> Option<f64> {
        self.max_of_type(SensorType::TEMP)
    }

    pub fn min_rpm(&self) -> Option<f64> {
        self.min_of_type(SensorType::FAN)
    }

    pub fn max_rpm(&self) -> Option<f64> {
        self.max_of_type(SensorType::FAN)
    }

    /// Resize every sensor's history. Nothing changes on an invalid capacity.
    pub fn resize_all(&mut self, capacity: usize) -> SensorResult<()> {
        if capacity == 0 {
            return Err(SensorError::invalid_capacity(capacity));
        }
        for sensor in &mut self.sensors {
            sensor.resize(capacity)?;
        }
        Ok(())
    }

    /// Ask each adapter to push fresh readings into the sensors it owns.
    ///
    /// A failing adapter is logged and skipped; the others still run.
    pub fn update_all_measures(&mut self, adapters: &mut [BoxedSourceAdapter]) {
        for adapter in adapters.iter_mut() {
            if let Err(e) = adapter.refresh(self) {
                log::warn!("Failed to refresh {} sensors: {:#}", adapter.name(), e);
            }
        }
        log::trace!("Refreshed {} sensors from {} adapters", self.len(), adapters.len());
    }
}

impl<'a> IntoIterator for &'a SensorRegistry {
    type Item = &'a Sensor;
    type IntoIter = std::slice::Iter<'a, Sensor>;

    fn into_iter(self) -> Self::IntoIter {
        self.sensors.iter()
    }
}

impl FromIterator<Sensor> for SensorRegistry {
    fn from_iter<I: IntoIterator<Item = Sensor>>(iter: I) -> Self {
        let mut registry = SensorRegistry::new();
        registry.extend(iter);
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source_adapter::SourceAdapter;
    use anyhow::{anyhow, Result};
    use hwsens_types::UNKNOWN;

    fn sensor(id: &str, sensor_type: SensorType, samples: &[Option<f64>]) -> Sensor {
        let mut s = Sensor::new(id, id, sensor_type, samples.len().max(1)).unwrap();
        for v in samples {
            s.set_current_value(*v);
        }
        s
    }

    fn two_temps() -> SensorRegistry {
        let mut registry = SensorRegistry::new();
        registry
            .add(sensor("a", SensorType::LMSENSOR_TEMP, &[Some(10.0), Some(20.0)]))
            .unwrap();
        registry
            .add(sensor("b", SensorType::HDD_TEMP, &[Some(5.0), UNKNOWN]))
            .unwrap();
        registry
    }

    #[test]
    fn test_empty_registry() {
        let registry = SensorRegistry::new();
        assert_eq!(registry.len(), 0);
        assert!(registry.is_empty());
        assert!(!registry.contains_type(SensorType::TEMP));
        assert!(registry.get_by_id("x").is_none());
        assert_eq!(registry.min_of_type(SensorType::TEMP), None);
        assert_eq!(registry.max_of_type(SensorType::FAN), None);
    }

    #[test]
    fn test_add_reports_size_and_keeps_order() {
        let mut registry = SensorRegistry::new();
        assert_eq!(registry.add(sensor("a", SensorType::TEMP, &[])).unwrap(), 1);
        assert_eq!(registry.add(sensor("b", SensorType::FAN, &[])).unwrap(), 2);
        let ids: Vec<&str> = registry.iter().map(|s| s.id()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_duplicate_id_is_rejected() {
        let mut registry = SensorRegistry::new();
        registry.add(sensor("a", SensorType::TEMP, &[Some(1.0)])).unwrap();
        let err = registry.add(sensor("a", SensorType::FAN, &[])).unwrap_err();
        assert_eq!(err, SensorError::DuplicateId("a".to_string()));
        assert_eq!(registry.len(), 1);
        assert!(registry.get_by_id("a").unwrap().is_temperature());

        let added = registry.extend(vec![
            sensor("a", SensorType::FAN, &[]),
            sensor("c", SensorType::FAN, &[]),
        ]);
        assert_eq!(added, 1);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_contains_type_uses_intersection() {
        let registry = two_temps();
        assert!(registry.contains_type(SensorType::TEMP));
        assert!(registry.contains_type(SensorType::HDD));
        assert!(!registry.contains_type(SensorType::FAN));
        assert!(registry.contains_type(SensorType::FAN | SensorType::HDD));
    }

    #[test]
    fn test_window_aggregates() {
        let mut registry = two_temps();
        assert_eq!(registry.min_of_type(SensorType::TEMP), Some(5.0));
        assert_eq!(registry.max_of_type(SensorType::TEMP), Some(20.0));
        assert_eq!(registry.min_temp(), Some(5.0));
        assert_eq!(registry.max_rpm(), None);

        registry.get_by_id_mut("b").unwrap().set_enabled(false);
        assert_eq!(registry.min_of_type(SensorType::TEMP), Some(10.0));
        assert_eq!(registry.max_of_type(SensorType::TEMP), Some(20.0));
    }

    #[test]
    fn test_window_aggregates_differ_from_lifetime() {
        let mut registry = SensorRegistry::new();
        registry
            .add(sensor("fan", SensorType::LMSENSOR_FAN, &[Some(900.0), Some(1200.0)]))
            .unwrap();
        let fan = registry.get_by_id_mut("fan").unwrap();
        fan.set_current_value(Some(1100.0));
        fan.set_current_value(Some(1000.0));

        assert_eq!(registry.min_rpm(), Some(1000.0));
        assert_eq!(registry.max_rpm(), Some(1100.0));
        let fan = registry.get_by_id("fan").unwrap();
        assert_eq!(fan.min(), Some(900.0));
        assert_eq!(fan.max(), Some(1200.0));
    }

    #[test]
    fn test_remove() {
        let mut registry = two_temps();
        let removed = registry.remove("a").unwrap();
        assert_eq!(removed.id(), "a");
        assert_eq!(registry.len(), 1);
        assert!(registry.remove("a").is_none());
        assert_eq!(registry.min_temp(), Some(5.0));
    }

    #[test]
    fn test_resize_all() {
        let mut registry = two_temps();
        assert!(registry.resize_all(0).is_err());
        assert_eq!(registry.get_by_id("a").unwrap().buffer_capacity(), 2);

        registry.resize_all(8).unwrap();
        assert!(registry.iter().all(|s| s.buffer_capacity() == 8));
    }

    #[test]
    fn test_collect_into_registry() {
        let registry: SensorRegistry = vec![
            sensor("x", SensorType::TEMP, &[]),
            sensor("x", SensorType::TEMP, &[]),
            sensor("y", SensorType::FAN, &[]),
        ]
        .into_iter()
        .collect();
        assert_eq!(registry.len(), 2);
    }

    struct Constant {
        id: &'static str,
        value: f64,
    }

    impl SourceAdapter for Constant {
        fn name(&self) -> &str {
            "constant"
        }

        fn list_sensors(&mut self, buffer_capacity: usize) -> Result<Vec<Sensor>> {
            Ok(vec![Sensor::new(self.id, self.id, SensorType::TEMP, buffer_capacity)?])
        }

        fn refresh(&mut self, registry: &mut SensorRegistry) -> Result<()> {
            if let Some(sensor) = registry.get_by_id_mut(self.id) {
                sensor.set_current_value(Some(self.value));
            }
            Ok(())
        }
    }

    struct Broken;

    impl SourceAdapter for Broken {
        fn name(&self) -> &str {
            "broken"
        }

        fn list_sensors(&mut self, _buffer_capacity: usize) -> Result<Vec<Sensor>> {
            Ok(Vec::new())
        }

        fn refresh(&mut self, _registry: &mut SensorRegistry) -> Result<()> {
            Err(anyhow!("probe failed"))
        }
    }

    #[test]
    fn test_update_all_measures_delegates_to_adapters() {
        let mut adapters: Vec<BoxedSourceAdapter> = vec![
            Box::new(Broken),
            Box::new(Constant { id: "one", value: 41.0 }),
            Box::new(Constant { id: "missing", value: 99.0 }),
        ];

        let mut registry = SensorRegistry::new();
        let sensors = adapters[1].list_sensors(4).unwrap();
        registry.extend(sensors);

        registry.update_all_measures(&mut adapters);
        registry.update_all_measures(&mut adapters);

        let one = registry.get_by_id("one").unwrap();
        assert_eq!(one.current_value(), Some(41.0));
        assert_eq!(one.measures().known_values().count(), 2);
        assert_eq!(registry.len(), 1);
    }
}
