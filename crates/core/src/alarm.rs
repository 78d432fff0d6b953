//! Threshold alarm edge detection

use crate::sensor::Sensor;

/// Called synchronously when a sensor's alarm goes from not raised to raised.
///
/// The callback only gets a shared reference, so it cannot push samples
/// into the sensor that triggered it.
pub type AlarmCallback = Box<dyn FnMut(&Sensor) + Send>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlarmState {
    #[default]
    NotRaised,
    Raised,
}

/// Edge-triggered threshold detector.
///
/// Fires once per upward crossing of `limit`. A limit of `0.0` or a
/// disabled alarm makes the evaluator inert: samples are ignored and the
/// current state is kept as is.
#[derive(Debug, Clone, Default)]
pub struct AlarmEvaluator {
    limit: f64,
    enabled: bool,
    state: AlarmState,
}

impl AlarmEvaluator {
    pub fn new(limit: f64, enabled: bool) -> Self {
        Self {
            limit,
            enabled,
            state: AlarmState::NotRaised,
        }
    }

    pub fn limit(&self) -> f64 {
        self.limit
    }

    pub fn set_limit(&mut self, limit: f64) {
        self.limit = limit;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn state(&self) -> AlarmState {
        self.state
    }

    pub fn is_raised(&self) -> bool {
        self.state == AlarmState::Raised
    }

    /// Whether new samples are evaluated at all
    pub fn is_armed(&self) -> bool {
        self.enabled && self.limit != 0.0
    }

    /// Feed one sample. Returns true exactly when the alarm was just raised.
    ///
    /// `UNKNOWN` samples carry no information about the threshold and
    /// leave the state unchanged.
    pub fn evaluate(&mut self, value: Option<f64>) -> bool {
        if !self.is_armed() {
            return false;
        }
        let Some(v) = value else {
            return false;
        };

        if v > self.limit {
            let was_raised = self.is_raised();
            self.state = AlarmState::Raised;
            !was_raised
        } else {
            self.state = AlarmState::NotRaised;
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edges(evaluator: &mut AlarmEvaluator, samples: &[f64]) -> Vec<bool> {
        samples.iter().map(|v| evaluator.evaluate(Some(*v))).collect()
    }

    #[test]
    fn test_fires_on_upward_crossings_only() {
        let mut alarm = AlarmEvaluator::new(50.0, true);
        assert_eq!(
            edges(&mut alarm, &[40.0, 60.0, 70.0, 30.0, 80.0]),
            vec![false, true, false, false, true]
        );
        assert!(alarm.is_raised());
    }

    #[test]
    fn test_value_at_limit_is_not_a_breach() {
        let mut alarm = AlarmEvaluator::new(50.0, true);
        assert!(!alarm.evaluate(Some(50.0)));
        assert_eq!(alarm.state(), AlarmState::NotRaised);
    }

    #[test]
    fn test_disabled_alarm_is_inert() {
        let mut alarm = AlarmEvaluator::new(50.0, false);
        assert_eq!(edges(&mut alarm, &[60.0, 10.0, 90.0]), vec![false; 3]);
        assert_eq!(alarm.state(), AlarmState::NotRaised);
    }

    #[test]
    fn test_zero_limit_is_inert() {
        let mut alarm = AlarmEvaluator::new(0.0, true);
        assert_eq!(edges(&mut alarm, &[1.0, 100.0]), vec![false, false]);
    }

    #[test]
    fn test_disabling_keeps_raised_state() {
        let mut alarm = AlarmEvaluator::new(50.0, true);
        assert!(alarm.evaluate(Some(60.0)));

        alarm.set_enabled(false);
        alarm.evaluate(Some(10.0));
        assert!(alarm.is_raised());

        // Re-enabling while still above the limit does not fire again
        alarm.set_enabled(true);
        assert!(!alarm.evaluate(Some(70.0)));
    }

    #[test]
    fn test_unknown_sample_keeps_state() {
        let mut alarm = AlarmEvaluator::new(50.0, true);
        alarm.evaluate(Some(60.0));
        assert!(!alarm.evaluate(None));
        assert!(alarm.is_raised());
        assert!(!alarm.evaluate(Some(65.0)));
    }
}
