//! Game constants shared across the simulation.
//!
//! Tuning values for the player live in [`crate::config`]; the values here
//! are structural and do not change between levels.

/// Edge length of a map tile in world units.
pub const TILE_SIZE: f64 = 64.0;

/// Default viewport width in world units.
pub const VIEWPORT_WIDTH: f64 = 1280.0;
/// Default viewport height in world units.
pub const VIEWPORT_HEIGHT: f64 = 720.0;

/// Fraction of the viewport where the camera dead zone starts on each axis.
pub const DEAD_ZONE_MIN: f64 = 0.25;
/// Fraction of the viewport where the camera dead zone ends on each axis.
pub const DEAD_ZONE_MAX: f64 = 0.75;

/// Frames of recovery over which the post-dash deceleration ramp reaches
/// its nominal intensity.
pub const DASH_RAMP_FRAMES: f64 = 10.0;
