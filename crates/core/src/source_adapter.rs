//! Trait implemented by hardware backends

use crate::registry::SensorRegistry;
use crate::sensor::Sensor;
use anyhow::Result;

/// A backend that knows a set of sensors and can probe their readings.
///
/// Adapters own sensors by identifier only: the registry holds the
/// `Sensor` values and the adapter looks its own ones up on each refresh.
pub trait SourceAdapter: Send {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Discover the sensors this backend provides, each with an empty
    /// history of `buffer_capacity` slots. Called once at startup.
    fn list_sensors(&mut self, buffer_capacity: usize) -> Result<Vec<Sensor>>;

    /// Probe every owned sensor and push the readings into `registry`.
    ///
    /// Ids missing from the registry are skipped. A sensor whose probe
    /// fails gets an `UNKNOWN` sample.
    fn refresh(&mut self, registry: &mut SensorRegistry) -> Result<()>;

    /// Check if this backend can work on the current system
    fn is_available(&self) -> bool {
        true
    }
}

/// Type-erased adapter for dynamic dispatch
pub type BoxedSourceAdapter = Box<dyn SourceAdapter>;
