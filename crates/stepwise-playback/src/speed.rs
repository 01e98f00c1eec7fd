//! Playback speed and tick delays

use crate::error::PlaybackError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Playback speed; higher is faster
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Speed(u8);

impl Speed {
    /// Raw speed value
    #[inline]
    #[must_use]
    pub fn get(self) -> u8 {
        self.0
    }

    /// Delay between ticks: `base / speed`
    #[inline]
    #[must_use]
    pub fn delay(self, base: Duration) -> Duration {
        base / u32::from(self.0.max(1))
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x", self.0)
    }
}

/// Inclusive bounds on [`Speed`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeedRange {
    min: u8,
    max: u8,
}

impl SpeedRange {
    /// Create a range; `min` must be at least 1 and not above `max`
    ///
    /// # Errors
    /// [`PlaybackError::InvalidConfig`] for an empty or zero-based range
    pub fn new(min: u8, max: u8) -> Result<Self, PlaybackError> {
        if min == 0 || min > max {
            return Err(PlaybackError::InvalidConfig(format!(
                "speed range {min}..={max} must be non-empty and start at 1 or more"
            )));
        }
        Ok(Self { min, max })
    }

    /// Slowest speed
    #[inline]
    #[must_use]
    pub fn min(&self) -> u8 {
        self.min
    }

    /// Fastest speed
    #[inline]
    #[must_use]
    pub fn max(&self) -> u8 {
        self.max
    }

    /// Validate a requested speed
    ///
    /// # Errors
    /// [`PlaybackError::SpeedOutOfRange`] if `value` is outside the range
    pub fn speed(&self, value: u8) -> Result<Speed, PlaybackError> {
        if value < self.min || value > self.max {
            return Err(PlaybackError::SpeedOutOfRange {
                requested: value,
                min: self.min,
                max: self.max,
            });
        }
        Ok(Speed(value))
    }

    /// One notch faster, saturating at the top
    #[must_use]
    pub fn faster(&self, speed: Speed) -> Speed {
        Speed(speed.0.saturating_add(1).clamp(self.min, self.max))
    }

    /// One notch slower, saturating at the bottom
    #[must_use]
    pub fn slower(&self, speed: Speed) -> Speed {
        Speed(speed.0.saturating_sub(1).clamp(self.min, self.max))
    }
}

impl Default for SpeedRange {
    fn default() -> Self {
        Self { min: 1, max: 10 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delay_divides_base() {
        let range = SpeedRange::default();
        let speed = range.speed(4).unwrap();
        assert_eq!(speed.delay(Duration::from_millis(1000)), Duration::from_millis(250));
    }

    #[test]
    fn out_of_range_is_rejected() {
        let range = SpeedRange::new(1, 5).unwrap();
        assert!(matches!(
            range.speed(6),
            Err(PlaybackError::SpeedOutOfRange { requested: 6, min: 1, max: 5 })
        ));
        assert!(SpeedRange::new(0, 5).is_err());
        assert!(SpeedRange::new(6, 5).is_err());
    }

    #[test]
    fn faster_and_slower_saturate() {
        let range = SpeedRange::new(1, 3).unwrap();
        let top = range.speed(3).unwrap();
        assert_eq!(range.faster(top), top);
        let bottom = range.speed(1).unwrap();
        assert_eq!(range.slower(bottom), bottom);
        assert_eq!(range.faster(bottom).get(), 2);
    }
}
