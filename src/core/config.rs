//! Configuration for a bike-share simulation run
//!
//! Controls the size of each driver step and the occupancy thresholds used
//! by the per-step statistics tick.

use super::errors::ConfigError;
use chrono::Duration;

pub const DEFAULT_LOW_AVAILABILITY_THRESHOLD: u32 = 5;
pub const DEFAULT_LOW_UNOCCUPIED_THRESHOLD: u32 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationConfig {
    /// How far the cursor advances per step
    pub step: Duration,
    /// A station with at most this many bikes counts as low availability
    pub low_availability_threshold: u32,
    /// A station with at most this many free docks counts as low unoccupied
    pub low_unoccupied_threshold: u32,
    /// Whether the statistics phase also runs on the step that lands on `end`
    pub tick_final_step: bool,
}

impl SimulationConfig {
    /// Create a configuration with one-minute steps and thresholds of 5
    pub fn new() -> Self {
        Self {
            step: Duration::minutes(1),
            low_availability_threshold: DEFAULT_LOW_AVAILABILITY_THRESHOLD,
            low_unoccupied_threshold: DEFAULT_LOW_UNOCCUPIED_THRESHOLD,
            tick_final_step: true,
        }
    }

    /// Set the cursor step
    pub fn with_step(mut self, step: Duration) -> Self {
        self.step = step;
        self
    }

    /// Set both low-occupancy thresholds
    ///
    /// # Arguments
    /// * `availability` - bike count at or below which a station is low on bikes
    /// * `unoccupied` - free dock count at or below which a station is low on docks
    pub fn with_thresholds(mut self, availability: u32, unoccupied: u32) -> Self {
        self.low_availability_threshold = availability;
        self.low_unoccupied_threshold = unoccupied;
        self
    }

    /// Choose whether the last step (at `end`) accumulates statistics.
    ///
    /// With `false`, low-occupancy time over a window equals at most the
    /// window length.
    pub fn with_final_tick(mut self, tick: bool) -> Self {
        self.tick_final_step = tick;
        self
    }

    /// Seconds credited to a low counter per tick
    pub fn seconds_per_tick(&self) -> u64 {
        self.step.num_seconds().max(0) as u64
    }

    /// Steps must be a positive whole number of seconds
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.step <= Duration::zero() {
            return Err(ConfigError::NonPositiveStep(self.step.num_seconds()));
        }
        if self.step != Duration::seconds(self.step.num_seconds()) {
            return Err(ConfigError::FractionalStep(self.step.num_milliseconds()));
        }
        Ok(())
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SimulationConfig::default();
        assert_eq!(config.step, Duration::minutes(1));
        assert_eq!(config.low_availability_threshold, 5);
        assert_eq!(config.low_unoccupied_threshold, 5);
        assert!(config.tick_final_step);
        assert_eq!(config.seconds_per_tick(), 60);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = SimulationConfig::new()
            .with_step(Duration::seconds(30))
            .with_thresholds(2, 3)
            .with_final_tick(false);

        assert_eq!(config.seconds_per_tick(), 30);
        assert_eq!(config.low_availability_threshold, 2);
        assert_eq!(config.low_unoccupied_threshold, 3);
        assert!(!config.tick_final_step);
    }

    #[test]
    fn test_rejects_non_positive_step() {
        let config = SimulationConfig::new().with_step(Duration::zero());
        assert_eq!(config.validate(), Err(ConfigError::NonPositiveStep(0)));

        let config = SimulationConfig::new().with_step(Duration::minutes(-1));
        assert_eq!(config.validate(), Err(ConfigError::NonPositiveStep(-60)));
    }

    #[test]
    fn test_rejects_fractional_step() {
        let config = SimulationConfig::new().with_step(Duration::milliseconds(500));
        assert_eq!(config.validate(), Err(ConfigError::FractionalStep(500)));

        let config = SimulationConfig::new().with_step(Duration::milliseconds(1_500));
        assert_eq!(config.validate(), Err(ConfigError::FractionalStep(1_500)));

        let config = SimulationConfig::new().with_step(Duration::seconds(2));
        assert!(config.validate().is_ok());
        assert_eq!(config.seconds_per_tick(), 2);
    }
}
