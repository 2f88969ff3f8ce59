//! Basic vector math helper functions.
//! Small helpers for magnitudes, normalisation and rescaling of 2D vectors.
use glam::DVec2;

/// Returns the magnitude of a vector expressed by its components.
///
/// # Examples
/// ```
/// use mariana::vector_math::vec_mag;
/// let magnitude = vec_mag(3.0, 4.0);
/// assert!((magnitude - 5.0).abs() < f64::EPSILON);
/// ```
#[must_use]
pub fn vec_mag(component_x: f64, component_y: f64) -> f64 {
    DVec2::new(component_x, component_y).length()
}

/// Returns the unit vector in the direction of `vector`.
///
/// Non-finite input and the zero vector both yield `DVec2::ZERO`.
///
/// # Examples
///
/// ```
/// use glam::DVec2;
/// use mariana::vec_normalize;
/// let n = vec_normalize(DVec2::new(3.0, 4.0));
/// assert!((n.x - 0.6).abs() < 1e-12);
/// assert!((n.y - 0.8).abs() < 1e-12);
///
/// assert_eq!(vec_normalize(DVec2::ZERO), DVec2::ZERO);
/// ```
#[must_use]
pub fn vec_normalize(vector: DVec2) -> DVec2 {
    if !vector.is_finite() {
        return DVec2::ZERO;
    }
    vector.try_normalize().unwrap_or(DVec2::ZERO)
}

/// Scales `vector` down so its magnitude does not exceed `cap`.
///
/// Direction is preserved. The zero vector is returned unchanged without
/// dividing by its length.
#[must_use]
pub fn clamp_magnitude(vector: DVec2, cap: f64) -> DVec2 {
    let magnitude = vector.length();
    if magnitude == 0.0 || magnitude <= cap {
        return vector;
    }
    vector * (cap / magnitude)
}
