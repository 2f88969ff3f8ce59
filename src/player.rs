//! Player movement: a [`KinematicBody`] with dash and sprint abilities.
//!
//! Dashing and sprinting only change a handful of the body's integration
//! steps. Rather than overriding the body, the controller derives a
//! [`MotionState`] each frame and feeds the body's public steps with the
//! parameters that state calls for.

use glam::DVec2;
use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::body::{KinematicBody, MovementProfile};
use crate::constants::DASH_RAMP_FRAMES;
use crate::geometry::Rect;
use crate::vector_math::vec_normalize;

/// Tuning for the dash ability.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashProfile {
    /// Speed the dash launches at and the cap while dashing.
    pub dash_speed: f64,
    /// Frames the dash holds its launch velocity.
    pub dash_duration: f64,
    /// Deceleration multiplier applied while recovering from a dash.
    pub dash_decel_multiplier: f64,
    /// Ramp the recovery deceleration up with the frames spent recovering.
    /// Without the ramp the dash ends as soon as the hold runs out.
    pub decel_ramp: bool,
}

impl Default for DashProfile {
    fn default() -> Self {
        Self {
            dash_speed: 9.0,
            dash_duration: 20.0,
            dash_decel_multiplier: 3.0,
            decel_ramp: true,
        }
    }
}

/// Tuning for the sprint ability.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SprintProfile {
    /// Velocity cap while sprinting.
    pub sprint_speed: f64,
    /// Multiplier on acceleration while sprinting.
    pub sprint_acceleration_multiplier: f64,
}

impl Default for SprintProfile {
    fn default() -> Self {
        Self {
            sprint_speed: 7.0,
            sprint_acceleration_multiplier: 2.0,
        }
    }
}

/// Which movement rules govern the current frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionState {
    /// Standard acceleration and `max_velocity` cap.
    Normal,
    /// Boosted acceleration and the `sprint_speed` cap.
    Sprinting,
    /// Dash velocity override; takes precedence over sprinting.
    Dashing,
}

/// The player-controlled body.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerController {
    /// Underlying kinematic body.
    pub body: KinematicBody,
    /// Dash tuning.
    pub dash: DashProfile,
    /// Sprint tuning.
    pub sprint: SprintProfile,
    /// Whether a dash may start; cleared by a dash, set on button release.
    pub can_dash: bool,
    /// Whether the dash velocity rules are in force.
    pub is_dashing: bool,
    /// Frames left in the dash hold; negative values count recovery.
    pub dash_timer: f64,
    /// Whether the sprint button is held.
    pub is_sprinting: bool,
    /// Whether the player hit a collider during the last resolved frame.
    pub on_wall: bool,
}

impl PlayerController {
    /// Creates a player at rest.
    #[must_use]
    pub const fn new(
        position: DVec2,
        size: DVec2,
        movement: MovementProfile,
        dash: DashProfile,
        sprint: SprintProfile,
    ) -> Self {
        Self {
            body: KinematicBody::new(position, size, movement),
            dash,
            sprint,
            can_dash: true,
            is_dashing: false,
            dash_timer: 0.0,
            is_sprinting: false,
            on_wall: false,
        }
    }

    /// Movement rules for the current frame.
    #[must_use]
    pub const fn motion_state(&self) -> MotionState {
        if self.is_dashing {
            MotionState::Dashing
        } else if self.is_sprinting {
            MotionState::Sprinting
        } else {
            MotionState::Normal
        }
    }

    /// Advances the player by one frame scaled by `delta`.
    ///
    /// While the dash hold is running only the acceleration clamp, velocity
    /// cap and position steps run, so the launch velocity is kept intact.
    pub fn update(&mut self, delta: f64) {
        if self.dash_timer > 0.0 {
            self.dash_timer -= delta;
        }
        if self.dash_timer > 0.0 {
            self.body.clamp_acceleration();
            self.check_velocity();
            self.body.integrate_position(delta);
            return;
        }

        self.body.clamp_acceleration();
        let scale = if self.is_sprinting {
            self.sprint.sprint_acceleration_multiplier
        } else {
            1.0
        };
        self.body
            .integrate_velocity(self.body.acceleration * scale, delta);
        let rate = self.deceleration_rate(delta);
        self.body.apply_deceleration(rate, delta);
        self.check_velocity();
        self.body.integrate_position(delta);
    }

    /// Deceleration for this frame, ramped up while recovering from a dash.
    fn deceleration_rate(&mut self, delta: f64) -> f64 {
        let base = self.body.profile.deceleration_rate;
        if !(self.is_dashing && self.dash_timer <= 0.0) {
            return base;
        }
        self.dash_timer -= delta;
        if !self.dash.decel_ramp {
            return base * self.dash.dash_decel_multiplier;
        }
        let ramp = -self.dash_timer / DASH_RAMP_FRAMES;
        base * self.dash.dash_decel_multiplier * ramp
    }

    /// Caps the velocity according to the current [`MotionState`].
    ///
    /// A dash ends here: once speed has fallen to `max_velocity`, or the
    /// hold has run out with the recovery ramp disabled, the dashing flag
    /// clears and the standard cap applies.
    pub fn check_velocity(&mut self) {
        let max_velocity = self.body.profile.max_velocity;
        match self.motion_state() {
            MotionState::Dashing => {
                let hold_over = !self.dash.decel_ramp && self.dash_timer <= 0.0;
                if hold_over || self.body.speed() <= max_velocity {
                    self.is_dashing = false;
                    debug!("dash finished at speed {:.3}", self.body.speed());
                    self.body.clamp_velocity(max_velocity);
                } else {
                    self.body.clamp_velocity(self.dash.dash_speed);
                }
            }
            MotionState::Sprinting => self.body.clamp_velocity(self.sprint.sprint_speed),
            MotionState::Normal => self.body.clamp_velocity(max_velocity),
        }
    }

    /// Launches a dash along the current acceleration direction.
    ///
    /// Does nothing while the dash is disarmed or when there is no
    /// directional intent.
    pub fn dash(&mut self) {
        if !self.can_dash {
            trace!("dash ignored: not re-armed");
            return;
        }
        if self.body.acceleration == DVec2::ZERO {
            trace!("dash ignored: no direction held");
            return;
        }
        self.body.velocity = vec_normalize(self.body.acceleration) * self.dash.dash_speed;
        self.is_dashing = true;
        self.dash_timer = self.dash.dash_duration;
        self.can_dash = false;
        debug!("dash started with velocity {:?}", self.body.velocity);
    }

    /// Allows the next dash; called when the dash button is released.
    pub const fn rearm_dash(&mut self) {
        self.can_dash = true;
    }

    /// Records that the player hit a collider this frame.
    pub const fn handle_collision(&mut self) {
        self.on_wall = true;
    }

    /// World-space bounding box.
    #[must_use]
    pub const fn bounding_box(&self) -> Rect {
        self.body.bounding_box()
    }

    /// Current speed.
    #[must_use]
    pub fn speed(&self) -> f64 {
        self.body.speed()
    }
}
