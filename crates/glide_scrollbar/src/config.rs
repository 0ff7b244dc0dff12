//! Scrollbar configuration
//!
//! Loaded from TOML; every field is optional and falls back to the classic
//! desktop scrollbar metrics.
//!
//! ```toml
//! button_size = 17.0
//! arrow_scroll_rate = 40.0
//! repeat_delay = 0.3
//! duration_behavior = "inverse-delta"
//! ```

use glide_animation::DurationBehavior;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::state::MIN_THUMB_SIZE;

/// Configuration for scrollbar metrics and press behavior
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollbarConfig {
    /// Size of each end button in pixels
    pub button_size: f64,
    /// Minimum thumb length in pixels
    pub min_thumb_size: f64,
    /// Pixels scrolled per track press
    pub track_scroll_rate: f64,
    /// Pixels scrolled per arrow press
    pub arrow_scroll_rate: f64,
    /// Seconds a press is held before it starts repeating
    pub repeat_delay: f64,
    /// Seconds between repeats once repeating
    pub repeat_interval: f64,
    /// Repeated steps scroll `rate * repeat_multiplier`
    pub repeat_multiplier: f64,
    /// Duration policy for animated scrolls
    pub duration_behavior: DurationBehavior,
}

impl Default for ScrollbarConfig {
    fn default() -> Self {
        Self {
            button_size: 17.0,
            min_thumb_size: MIN_THUMB_SIZE,
            track_scroll_rate: 349.0,
            arrow_scroll_rate: 40.0,
            repeat_delay: 0.3,
            repeat_interval: 0.1,
            repeat_multiplier: 2.0,
            duration_behavior: DurationBehavior::InverseDelta,
        }
    }
}

impl ScrollbarConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        tracing::debug!(?config, "loaded scrollbar config");
        Ok(config)
    }

    /// Check every value is usable
    pub fn validate(&self) -> Result<()> {
        non_negative("button_size", self.button_size)?;
        non_negative("min_thumb_size", self.min_thumb_size)?;
        non_negative("track_scroll_rate", self.track_scroll_rate)?;
        non_negative("arrow_scroll_rate", self.arrow_scroll_rate)?;
        non_negative("repeat_delay", self.repeat_delay)?;
        non_negative("repeat_multiplier", self.repeat_multiplier)?;

        if !(self.repeat_interval.is_finite() && self.repeat_interval > 0.0) {
            return Err(ConfigError::Invalid {
                field: "repeat_interval",
                reason: format!("must be positive, got {}", self.repeat_interval),
            });
        }

        Ok(())
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("must be a finite non-negative number, got {value}"),
        })
    }
}
