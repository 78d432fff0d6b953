//! Update manager for scheduling periodic sensor refreshes

use hwsens_core::{BoxedSourceAdapter, SensorRegistry};
use log::{debug, trace};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::{Instant, MissedTickBehavior};

/// Registry handle shared between the refresh loop and its readers.
///
/// The write lock is held for a whole refresh pass, so readers never see a
/// sensor in the middle of a push.
pub type SharedRegistry = Arc<RwLock<SensorRegistry>>;

/// Drives every adapter once per interval
pub struct UpdateManager {
    registry: SharedRegistry,
    adapters: Vec<BoxedSourceAdapter>,
    ticks: u64,
}

impl UpdateManager {
    /// Create a manager refreshing `registry` from `adapters`
    pub fn new(registry: SensorRegistry, adapters: Vec<BoxedSourceAdapter>) -> Self {
        Self {
            registry: Arc::new(RwLock::new(registry)),
            adapters,
            ticks: 0,
        }
    }

    /// Handle for readers running alongside the update loop
    pub fn registry(&self) -> SharedRegistry {
        self.registry.clone()
    }

    /// Number of refresh passes performed
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Run one refresh pass over all adapters
    pub async fn tick(&mut self) {
        let start = Instant::now();
        {
            let mut registry = self.registry.write().await;
            registry.update_all_measures(&mut self.adapters);
        }
        self.ticks += 1;
        trace!("Update cycle {} took {:?}", self.ticks, start.elapsed());
    }

    /// Start the update loop
    ///
    /// Refreshes every `period` and hands the registry to `on_tick` after
    /// each pass. Runs until `max_ticks` passes are done, or forever when
    /// `max_ticks` is `None`.
    pub async fn run<F>(&mut self, period: Duration, max_ticks: Option<u64>, mut on_tick: F)
    where
        F: FnMut(&SensorRegistry),
    {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        debug!("Update loop started, period {:?}", period);

        loop {
            if max_ticks.is_some_and(|max| self.ticks >= max) {
                break;
            }

            interval.tick().await;
            self.tick().await;

            let registry = self.registry.read().await;
            on_tick(&registry);
        }

        debug!("Update loop finished after {} ticks", self.ticks);
    }
}
