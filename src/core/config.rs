//! Scenario configuration with documented constants
//!
//! All combat tuning numbers are collected here with explanations of their
//! purpose. The config is built once and handed to the world; nothing in
//! the kernel reads global state.

use crate::core::error::{FirelineError, Result};

/// Tuning knobs for a combat scenario
///
/// These values match the original balance tables. Changing them shifts
/// how lethal and how fast engagements feel.
#[derive(Debug, Clone)]
pub struct ScenarioConfig {
    /// Base percentage chance to hit before any modifiers apply
    ///
    /// Every shot starts here; stats, range, movement and wounds then
    /// push it up or down.
    pub base_hit_chance: f64,

    /// Flat penalty representing combat stress
    ///
    /// Offset by the shooter's coolness modifier, but never into a bonus:
    /// the stress term is capped at zero.
    pub base_stress_penalty: f64,

    /// Lowest hit chance a shot within weapon range can have
    ///
    /// Keeps desperate long shots possible without making them reliable.
    /// Shots beyond maximum range do without the floor; their chance is
    /// whatever the raw formula says, penalties and all.
    pub minimum_hit_chance: f64,

    /// Ticks a struck unit stays visually highlighted
    pub hit_highlight_ticks: u64,

    /// Ticks a firing unit stays visually highlighted
    ///
    /// Shorter than the hit highlight so muzzle flashes read as snappier
    /// than impacts.
    pub firing_highlight_ticks: u64,

    /// Default movement speed in pixels per second
    ///
    /// 42 px/s is 6 ft/s, a brisk walk. Movement types scale this.
    pub base_movement_speed: f64,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            base_hit_chance: 50.0,
            base_stress_penalty: -20.0,
            minimum_hit_chance: 0.01,
            hit_highlight_ticks: 15,
            firing_highlight_ticks: 10,
            base_movement_speed: 42.0,
        }
    }
}

impl ScenarioConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.base_hit_chance <= 0.0 {
            return Err(FirelineError::InvalidConfig(
                "base_hit_chance must be positive".into(),
            ));
        }
        if self.minimum_hit_chance <= 0.0 || self.minimum_hit_chance > self.base_hit_chance {
            return Err(FirelineError::InvalidConfig(format!(
                "minimum_hit_chance ({}) must be in (0, base_hit_chance]",
                self.minimum_hit_chance
            )));
        }
        if self.base_stress_penalty > 0.0 {
            return Err(FirelineError::InvalidConfig(
                "base_stress_penalty must not be a bonus".into(),
            ));
        }
        if self.base_movement_speed < 0.0 {
            return Err(FirelineError::InvalidConfig(
                "base_movement_speed must be non-negative".into(),
            ));
        }
        Ok(())
    }
}
