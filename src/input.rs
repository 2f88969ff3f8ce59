//! Normalised input consumed by the simulation once per frame.
//!
//! The input collaborator reports two things: a queue of discrete events
//! (tagged strings such as `ButtonDown:Fish Dash`) and a snapshot of the
//! continuous state of every control. [`FrameIntent::drain`] folds the queue
//! into the flags the level acts on.

use std::fmt;
use std::str::FromStr;

use glam::DVec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A movement axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Left (-1) to right (+1).
    PlayerHoriz,
    /// Up (-1) to down (+1).
    PlayerVert,
}

impl Axis {
    /// Control name used in event tags.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::PlayerHoriz => "Axis Player Horiz",
            Self::PlayerVert => "Axis Player Vert",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "Axis Player Horiz" => Some(Self::PlayerHoriz),
            "Axis Player Vert" => Some(Self::PlayerVert),
            _ => None,
        }
    }
}

/// A digital button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    /// Edge-triggered dash.
    Dash,
    /// Held sprint.
    Sprint,
}

impl Button {
    /// Control name used in event tags.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Dash => "Fish Dash",
            Self::Sprint => "Fish Sprint",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "Fish Dash" => Some(Self::Dash),
            "Fish Sprint" => Some(Self::Sprint),
            _ => None,
        }
    }
}

/// A discrete input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputEvent {
    /// The value of an axis changed; read the new value from [`InputState`].
    AxisMoved(Axis),
    /// A button went down.
    ButtonDown(Button),
    /// A button came up.
    ButtonUp(Button),
}

/// Errors raised when decoding event tags.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// The tag had no `kind:name` separator.
    #[error("input tag `{0}` has no `:` separator")]
    MissingSeparator(String),
    /// The tag kind was not one of `AxisMoved`, `ButtonDown`, `ButtonUp`.
    #[error("unknown input event kind `{0}`")]
    UnknownKind(String),
    /// The control name does not match any axis or button for the kind.
    #[error("unknown control `{name}` for `{kind}`")]
    UnknownControl {
        /// Event kind from the tag.
        kind: String,
        /// Control name from the tag.
        name: String,
    },
}

impl FromStr for InputEvent {
    type Err = InputError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        let (kind, name) = tag
            .split_once(':')
            .ok_or_else(|| InputError::MissingSeparator(tag.to_owned()))?;
        let unknown = || InputError::UnknownControl {
            kind: kind.to_owned(),
            name: name.to_owned(),
        };
        match kind {
            "AxisMoved" => Axis::from_name(name).map(Self::AxisMoved).ok_or_else(unknown),
            "ButtonDown" => Button::from_name(name).map(Self::ButtonDown).ok_or_else(unknown),
            "ButtonUp" => Button::from_name(name).map(Self::ButtonUp).ok_or_else(unknown),
            other => Err(InputError::UnknownKind(other.to_owned())),
        }
    }
}

impl fmt::Display for InputEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AxisMoved(axis) => write!(f, "AxisMoved:{}", axis.name()),
            Self::ButtonDown(button) => write!(f, "ButtonDown:{}", button.name()),
            Self::ButtonUp(button) => write!(f, "ButtonUp:{}", button.name()),
        }
    }
}

/// Snapshot of every continuous control.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InputState {
    /// Horizontal axis in `[-1, 1]`.
    pub horizontal: f64,
    /// Vertical axis in `[-1, 1]`.
    pub vertical: f64,
    /// Dash button held.
    pub dash: bool,
    /// Sprint button held.
    pub sprint: bool,
}

impl InputState {
    /// Both movement axes as a vector.
    #[must_use]
    pub const fn axes(&self) -> DVec2 {
        DVec2::new(self.horizontal, self.vertical)
    }
}

/// What one frame's event queue asks of the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameIntent {
    /// A movement axis changed, so acceleration must be recomputed.
    pub axis_moved: bool,
    /// The dash button went down.
    pub dash_pressed: bool,
    /// The dash button came up.
    pub dash_released: bool,
    /// Sprint flag after applying this frame's sprint events.
    pub sprint: bool,
}

impl FrameIntent {
    /// Empties `queue` and folds its events into an intent.
    ///
    /// Events are consumed newest first, matching a queue popped from its
    /// back. Each sprint event overwrites the flag, so when a press and a
    /// release arrive in the same frame the oldest one decides.
    pub fn drain(queue: &mut Vec<InputEvent>, sprinting: bool) -> Self {
        let mut intent = Self {
            sprint: sprinting,
            ..Self::default()
        };
        while let Some(event) = queue.pop() {
            match event {
                InputEvent::AxisMoved(_) => intent.axis_moved = true,
                InputEvent::ButtonDown(Button::Dash) => intent.dash_pressed = true,
                InputEvent::ButtonUp(Button::Dash) => intent.dash_released = true,
                InputEvent::ButtonDown(Button::Sprint) => intent.sprint = true,
                InputEvent::ButtonUp(Button::Sprint) => intent.sprint = false,
            }
        }
        intent
    }
}

/// Turns stick or key axes into an acceleration of at most
/// `max_acceleration` in magnitude.
///
/// Axis-aligned input is scaled per axis. Diagonal input is rescaled so its
/// length relative to a full diagonal (`√2`) maps onto `max_acceleration`,
/// which keeps diagonal movement from outpacing straight movement.
///
/// ```
/// use glam::DVec2;
/// use mariana::input::acceleration_from_axes;
/// let straight = acceleration_from_axes(DVec2::new(1.0, 0.0), 1.0);
/// let diagonal = acceleration_from_axes(DVec2::new(1.0, 1.0), 1.0);
/// assert!((straight.length() - diagonal.length()).abs() < 1e-12);
/// ```
#[must_use]
pub fn acceleration_from_axes(axes: DVec2, max_acceleration: f64) -> DVec2 {
    if axes.x == 0.0 || axes.y == 0.0 {
        return axes * max_acceleration;
    }
    let hyp = axes.length();
    let target = max_acceleration * (hyp / std::f64::consts::SQRT_2);
    axes * (target / hyp)
}
