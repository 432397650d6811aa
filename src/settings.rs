//! Driver-wide tuning knobs.

use serde::{Deserialize, Serialize};

use crate::error::PathError;
use crate::{DEFAULT_FADE_IN_SECONDS, REFERENCE_TICK_RATE, TURN_SMOOTHING_DIVISOR};

/// Settings shared by every actor a driver owns.
///
/// Missing JSON fields fall back to the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverSettings {
    /// Ticks per second the host calls [`crate::PathDriver::tick`] at.
    pub tick_rate: f32,
    /// Seconds a hidden actor takes to fade in from transparent.
    pub fade_in_seconds: f32,
    /// Each tick closes `1 / turn_divisor` of the gap to the target heading.
    pub turn_divisor: f32,
}

impl Default for DriverSettings {
    fn default() -> Self {
        Self {
            tick_rate: REFERENCE_TICK_RATE,
            fade_in_seconds: DEFAULT_FADE_IN_SECONDS,
            turn_divisor: TURN_SMOOTHING_DIVISOR,
        }
    }
}

impl DriverSettings {
    /// Parses settings from JSON.
    ///
    /// # Errors
    /// Returns [`PathError::InvalidArgument`] for malformed JSON or values
    /// rejected by [`DriverSettings::validate`].
    ///
    /// # Examples
    /// ```
    /// use shoal::DriverSettings;
    /// let settings = DriverSettings::from_json(r#"{"tick_rate": 30.0}"#).expect("valid");
    /// assert_eq!(settings.tick_rate, 30.0);
    /// assert_eq!(settings.turn_divisor, 8.0);
    /// ```
    pub fn from_json(json: &str) -> Result<Self, PathError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Rejects non-positive or non-finite values.
    ///
    /// # Errors
    /// Returns [`PathError::InvalidArgument`] naming the first bad field.
    pub fn validate(&self) -> Result<(), PathError> {
        for (name, value) in [
            ("tick_rate", self.tick_rate),
            ("fade_in_seconds", self.fade_in_seconds),
            ("turn_divisor", self.turn_divisor),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(PathError::invalid(format!(
                    "{name} must be a positive number, got {value}"
                )));
            }
        }
        Ok(())
    }

    /// Opacity added per tick while a hidden actor fades in.
    #[must_use]
    pub fn fade_step(&self) -> f32 {
        1.0 / (self.fade_in_seconds * self.tick_rate)
    }
}
