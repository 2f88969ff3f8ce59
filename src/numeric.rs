//! Numeric conversion helpers used across the project.
//!
//! These utilities guard conversions between floating-point world
//! coordinates and integer tile coordinates.

/// Floor the value and clamp it into the `i32` domain.
///
/// `NaN` maps to `0`.
#[expect(
    clippy::cast_possible_truncation,
    reason = "The value is clamped to the i32 bounds before casting."
)]
#[must_use]
pub fn floor_to_i32(value: f64) -> i32 {
    if value.is_nan() {
        return 0;
    }
    let floored = value.floor();
    let clamped = floored.clamp(f64::from(i32::MIN), f64::from(i32::MAX));
    clamped as i32
}

/// Converts a world coordinate into a tile coordinate clamped to
/// `0..=max_tile`.
#[must_use]
pub fn world_to_tile(value: f64, tile_size: f64, max_tile: u32) -> u32 {
    debug_assert!(tile_size > 0.0, "tile size must be positive");
    let tile = floor_to_i32(value / tile_size);
    u32::try_from(tile).map_or(0, |t| t.min(max_tile))
}
