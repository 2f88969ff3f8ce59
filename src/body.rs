//! Kinematic point-mass integration.
//!
//! A [`KinematicBody`] is an axis-aligned box that accelerates toward a
//! desired direction, bleeds speed through deceleration and never exceeds a
//! velocity cap. The individual steps are public so the player controller
//! can recombine them for its dash and sprint states; [`KinematicBody::update`]
//! runs them in the canonical order.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::geometry::Rect;
use crate::vector_math::{clamp_magnitude, vec_mag};

/// Caps and rates that shape how a body accelerates and slows down.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementProfile {
    /// Per-axis limit on acceleration.
    pub max_acceleration: f64,
    /// Limit on overall speed in the normal state.
    pub max_velocity: f64,
    /// Speed lost per unit of `delta`; `0.0` disables deceleration.
    pub deceleration_rate: f64,
}

impl Default for MovementProfile {
    fn default() -> Self {
        Self {
            max_acceleration: 1.0,
            max_velocity: 5.0,
            deceleration_rate: 0.2,
        }
    }
}

/// An accelerating, decelerating, velocity-capped box.
#[derive(Debug, Clone, PartialEq)]
pub struct KinematicBody {
    /// Top-left corner in world units.
    pub position: DVec2,
    /// Width and height of the bounding box.
    pub size: DVec2,
    /// Current velocity in world units per frame.
    pub velocity: DVec2,
    /// Desired acceleration; clamped per axis before use.
    pub acceleration: DVec2,
    /// Caps and rates applied by [`Self::update`].
    pub profile: MovementProfile,
    last_step: DVec2,
}

impl KinematicBody {
    /// Creates a body at rest.
    #[must_use]
    pub const fn new(position: DVec2, size: DVec2, profile: MovementProfile) -> Self {
        Self {
            position,
            size,
            velocity: DVec2::ZERO,
            acceleration: DVec2::ZERO,
            profile,
            last_step: DVec2::ZERO,
        }
    }

    /// Advances the body by one frame scaled by `delta`.
    pub fn update(&mut self, delta: f64) {
        self.clamp_acceleration();
        self.integrate_velocity(self.acceleration, delta);
        self.apply_deceleration(self.profile.deceleration_rate, delta);
        self.clamp_velocity(self.profile.max_velocity);
        self.integrate_position(delta);
    }

    /// Clamps each acceleration component to `±max_acceleration`.
    pub fn clamp_acceleration(&mut self) {
        let limit = self.profile.max_acceleration;
        self.acceleration = self
            .acceleration
            .clamp(DVec2::splat(-limit), DVec2::splat(limit));
    }

    /// Adds `acceleration * delta` to the velocity.
    pub fn integrate_velocity(&mut self, acceleration: DVec2, delta: f64) {
        self.velocity += acceleration * delta;
    }

    /// Slows the body along its direction of travel.
    ///
    /// The correction on each axis is `rate / speed * v_axis * delta`, where
    /// `speed` is the overall magnitude sampled once before either axis is
    /// touched. An axis with no acceleration that would flip sign is snapped
    /// to zero instead, so a coasting body comes to rest rather than
    /// oscillating. Nothing happens at zero speed or zero rate.
    pub fn apply_deceleration(&mut self, rate: f64, delta: f64) {
        if rate == 0.0 {
            return;
        }
        let speed = self.speed();
        if speed == 0.0 {
            return;
        }
        let factor = rate / speed * delta;
        self.velocity.x = decelerate_axis(self.velocity.x, self.acceleration.x, factor);
        self.velocity.y = decelerate_axis(self.velocity.y, self.acceleration.y, factor);
    }

    /// Uniformly scales the velocity down so the speed does not exceed `cap`.
    pub fn clamp_velocity(&mut self, cap: f64) {
        self.velocity = clamp_magnitude(self.velocity, cap);
    }

    /// Moves the body by `velocity * delta` and records the displacement.
    pub fn integrate_position(&mut self, delta: f64) {
        self.last_step = self.velocity * delta;
        self.position += self.last_step;
    }

    /// Euclidean norm of the velocity.
    #[must_use]
    pub fn speed(&self) -> f64 {
        vec_mag(self.velocity.x, self.velocity.y)
    }

    /// World-space bounding box.
    #[must_use]
    pub const fn bounding_box(&self) -> Rect {
        Rect::from_corner(self.position, self.size)
    }

    /// Displacement applied by the most recent [`Self::integrate_position`].
    #[must_use]
    pub const fn last_step(&self) -> DVec2 {
        self.last_step
    }
}

fn decelerate_axis(velocity: f64, acceleration: f64, factor: f64) -> f64 {
    if velocity == 0.0 {
        return velocity;
    }
    let slowed = velocity - factor * velocity;
    let flipped = slowed.signum() != velocity.signum() && slowed != 0.0;
    if acceleration == 0.0 && flipped {
        0.0
    } else {
        slowed
    }
}
