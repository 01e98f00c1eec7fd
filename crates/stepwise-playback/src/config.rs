//! Playback configuration

use crate::error::PlaybackError;
use crate::speed::{Speed, SpeedRange};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Timing settings for a controller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Delay between ticks at speed 1, in milliseconds
    pub base_delay_ms: u64,
    /// Slowest speed
    pub min_speed: u8,
    /// Fastest speed
    pub max_speed: u8,
    /// Speed a fresh controller starts at
    pub default_speed: u8,
}

impl PlaybackConfig {
    /// Default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base delay
    #[inline]
    #[must_use]
    pub fn with_base_delay(mut self, delay: Duration) -> Self {
        self.base_delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Set the speed bounds
    #[inline]
    #[must_use]
    pub fn with_speed_range(mut self, min: u8, max: u8) -> Self {
        self.min_speed = min;
        self.max_speed = max;
        self
    }

    /// Set the starting speed
    #[inline]
    #[must_use]
    pub fn with_default_speed(mut self, speed: u8) -> Self {
        self.default_speed = speed;
        self
    }

    /// Base delay as a [`Duration`]
    #[inline]
    #[must_use]
    pub fn base_delay(&self) -> Duration {
        Duration::from_millis(self.base_delay_ms)
    }

    /// Speed bounds
    ///
    /// # Errors
    /// [`PlaybackError::InvalidConfig`] if the bounds are unusable
    pub fn speed_range(&self) -> Result<SpeedRange, PlaybackError> {
        SpeedRange::new(self.min_speed, self.max_speed)
    }

    /// Starting speed, checked against the bounds
    ///
    /// # Errors
    /// [`PlaybackError::InvalidConfig`] if the default is out of range
    pub fn initial_speed(&self) -> Result<Speed, PlaybackError> {
        self.speed_range()?
            .speed(self.default_speed)
            .map_err(|e| PlaybackError::InvalidConfig(format!("default speed: {e}")))
    }

    /// Check every field
    ///
    /// # Errors
    /// [`PlaybackError::InvalidConfig`] describing the first problem found
    pub fn validate(&self) -> Result<(), PlaybackError> {
        if self.base_delay_ms == 0 {
            return Err(PlaybackError::InvalidConfig("base delay must be positive".into()));
        }
        self.initial_speed().map(|_| ())
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            base_delay_ms: 1000,
            min_speed: 1,
            max_speed: 10,
            default_speed: 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let config = PlaybackConfig::new();
        assert!(config.validate().is_ok());
        assert_eq!(config.initial_speed().unwrap().get(), 5);
        assert_eq!(config.base_delay(), Duration::from_secs(1));
    }

    #[test]
    fn builder_sets_fields() {
        let config = PlaybackConfig::new()
            .with_base_delay(Duration::from_millis(400))
            .with_speed_range(2, 4)
            .with_default_speed(3);
        assert_eq!(config.base_delay_ms, 400);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn default_speed_outside_range_is_invalid() {
        let config = PlaybackConfig::new().with_speed_range(1, 3).with_default_speed(9);
        assert!(matches!(config.validate(), Err(PlaybackError::InvalidConfig(_))));
        let config = PlaybackConfig::new().with_base_delay(Duration::ZERO);
        assert!(config.validate().is_err());
    }
}
