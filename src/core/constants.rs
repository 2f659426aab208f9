//! Unit conversions shared by movement and ballistics
//!
//! The world is measured in pixels and ticks; combat math runs in feet
//! and seconds. These two constants are the only bridge between them.

/// World scale: 7 pixels to the foot
pub const PIXELS_PER_FOOT: f64 = 7.0;

/// Simulation rate: 60 ticks to the second
pub const TICKS_PER_SECOND: f64 = 60.0;

/// Convert a pixel distance to feet
pub fn pixels_to_feet(pixels: f64) -> f64 {
    pixels / PIXELS_PER_FOOT
}

/// Convert a per-tick pixel speed to feet per second
pub fn pixels_per_tick_to_feet_per_second(px_per_tick: f64) -> f64 {
    px_per_tick * TICKS_PER_SECOND / PIXELS_PER_FOOT
}
