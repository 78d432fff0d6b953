//! Fixed-capacity measurement history for one sensor

use hwsens_types::{Measurement, SensorError, SensorResult, Timestamp};

/// Circular store of the last `capacity` samples, oldest first.
///
/// The buffer always holds exactly `capacity` slots. Slots that never
/// received a sample are `UNKNOWN` with a cleared timestamp.
#[derive(Debug, Clone)]
pub struct MeasurementBuffer {
    slots: Vec<Measurement>,
    /// Index of the oldest slot; the newest sits just before it
    head: usize,
}

impl MeasurementBuffer {
    /// Create a buffer of `capacity` empty slots
    pub fn new(capacity: usize) -> SensorResult<Self> {
        if capacity == 0 {
            return Err(SensorError::invalid_capacity(capacity));
        }

        Ok(Self {
            slots: vec![Measurement::unknown(); capacity],
            head: 0,
        })
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Drop the oldest sample and append `value` as the newest
    pub fn push(&mut self, value: Option<f64>, timestamp: Timestamp) {
        self.push_measurement(Measurement::new(value, timestamp));
    }

    pub fn push_measurement(&mut self, measurement: Measurement) {
        if self.slots.is_empty() {
            return;
        }
        self.slots[self.head] = measurement;
        self.head = (self.head + 1) % self.slots.len();
    }

    /// Slot at `index`, counted from the oldest
    pub fn get(&self, index: usize) -> Option<&Measurement> {
        if index >= self.slots.len() {
            return None;
        }
        Some(&self.slots[(self.head + index) % self.slots.len()])
    }

    /// Newest slot
    pub fn current(&self) -> SensorResult<&Measurement> {
        let capacity = self.capacity();
        if capacity == 0 {
            return Err(SensorError::EmptyState);
        }
        self.get(capacity - 1).ok_or(SensorError::EmptyState)
    }

    /// All slots from oldest to newest, `UNKNOWN` placeholders included
    pub fn iter(&self) -> impl Iterator<Item = &Measurement> + Clone + '_ {
        let (newer, older) = self.slots.split_at(self.head);
        older.iter().chain(newer.iter())
    }

    /// Values of the slots holding a reading, oldest first
    pub fn known_values(&self) -> impl Iterator<Item = f64> + '_ {
        self.iter().filter_map(|m| m.value)
    }

    /// Rebuild the buffer with `new_capacity` slots.
    ///
    /// The samples preceding the newest one are copied into the slots
    /// preceding the new newest slot, as many as fit; the newest slot of
    /// the resized buffer is always empty. Surviving samples keep their
    /// order. On error the buffer is left untouched.
    pub fn resize(&mut self, new_capacity: usize) -> SensorResult<()> {
        if new_capacity == 0 {
            return Err(SensorError::invalid_capacity(new_capacity));
        }

        let old_capacity = self.capacity();
        let mut slots = vec![Measurement::unknown(); new_capacity];
        let kept = new_capacity.min(old_capacity).saturating_sub(1);

        for i in 0..kept {
            if let Some(m) = self.get(old_capacity - 2 - i) {
                slots[new_capacity - 2 - i] = *m;
            }
        }

        log::trace!(
            "Resized measurement buffer {} -> {} ({} samples kept)",
            old_capacity,
            new_capacity,
            kept
        );

        self.slots = slots;
        self.head = 0;
        Ok(())
    }
}

impl<'a> IntoIterator for &'a MeasurementBuffer {
    type Item = &'a Measurement;
    type IntoIter = std::iter::Chain<std::slice::Iter<'a, Measurement>, std::slice::Iter<'a, Measurement>>;

    fn into_iter(self) -> Self::IntoIter {
        let (newer, older) = self.slots.split_at(self.head);
        older.iter().chain(newer.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hwsens_types::{cleared_timestamp, UNKNOWN};

    fn values(buffer: &MeasurementBuffer) -> Vec<Option<f64>> {
        buffer.iter().map(|m| m.value).collect()
    }

    fn filled(capacity: usize, samples: &[f64]) -> MeasurementBuffer {
        let mut buffer = MeasurementBuffer::new(capacity).unwrap();
        for v in samples {
            buffer.push(Some(*v), cleared_timestamp());
        }
        buffer
    }

    #[test]
    fn test_new_buffer_is_all_unknown() {
        let buffer = MeasurementBuffer::new(4).unwrap();
        assert_eq!(buffer.capacity(), 4);
        assert_eq!(values(&buffer), vec![UNKNOWN; 4]);
        assert!(buffer.current().unwrap().is_unknown());
    }

    #[test]
    fn test_zero_capacity_is_rejected() {
        assert!(matches!(MeasurementBuffer::new(0), Err(SensorError::Config(_))));
    }

    #[test]
    fn test_full_buffer_holds_pushes_in_order() {
        let buffer = filled(3, &[1.0, 2.0, 3.0]);
        assert_eq!(buffer.current().unwrap().value, Some(3.0));
        assert_eq!(values(&buffer), vec![Some(1.0), Some(2.0), Some(3.0)]);
    }

    #[test]
    fn test_push_drops_oldest() {
        let buffer = filled(3, &[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(values(&buffer), vec![Some(3.0), Some(4.0), Some(5.0)]);
        assert_eq!(buffer.capacity(), 3);
        assert_eq!(buffer.get(0).unwrap().value, Some(3.0));
        assert!(buffer.get(3).is_none());
    }

    #[test]
    fn test_partial_fill_keeps_unknown_at_old_end() {
        let buffer = filled(4, &[7.0]);
        assert_eq!(values(&buffer), vec![UNKNOWN, UNKNOWN, UNKNOWN, Some(7.0)]);
        assert_eq!(buffer.known_values().collect::<Vec<_>>(), vec![7.0]);
    }

    #[test]
    fn test_iteration_is_restartable() {
        let buffer = filled(2, &[1.0, 2.0, 3.0]);
        let iter = buffer.iter();
        let first: Vec<_> = iter.clone().map(|m| m.value).collect();
        let second: Vec<_> = (&buffer).into_iter().map(|m| m.value).collect();
        assert_eq!(first, second);
        assert_eq!(iter.count(), 2);
    }

    #[test]
    fn test_shrink_skips_newest_sample() {
        let mut buffer = filled(5, &[1.0, 2.0, 3.0, 4.0, 5.0]);
        buffer.resize(3).unwrap();
        assert_eq!(values(&buffer), vec![Some(3.0), Some(4.0), UNKNOWN]);
    }

    #[test]
    fn test_grow_pads_old_end() {
        let mut buffer = filled(3, &[3.0, 4.0, 5.0]);
        buffer.resize(5).unwrap();
        assert_eq!(values(&buffer), vec![UNKNOWN, UNKNOWN, Some(3.0), Some(4.0), UNKNOWN]);
    }

    #[test]
    fn test_resize_after_wraparound() {
        let mut buffer = filled(3, &[1.0, 2.0, 3.0, 4.0]);
        buffer.resize(3).unwrap();
        assert_eq!(values(&buffer), vec![Some(2.0), Some(3.0), UNKNOWN]);

        buffer.push(Some(9.0), cleared_timestamp());
        assert_eq!(values(&buffer), vec![Some(3.0), UNKNOWN, Some(9.0)]);
    }

    #[test]
    fn test_resize_to_one_slot() {
        let mut buffer = filled(4, &[1.0, 2.0]);
        buffer.resize(1).unwrap();
        assert_eq!(values(&buffer), vec![UNKNOWN]);
    }

    #[test]
    fn test_resize_to_zero_leaves_buffer_intact() {
        let mut buffer = filled(2, &[1.0, 2.0]);
        assert!(buffer.resize(0).is_err());
        assert_eq!(values(&buffer), vec![Some(1.0), Some(2.0)]);
    }
}
