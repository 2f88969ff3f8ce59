//! Library crate providing the Mariana movement and level core.
//!
//! A [`Level`] owns a static [`TileMap`], a [`PlayerController`] and a
//! dead-zone [`Camera`]. Each frame the host drains its input queue into
//! [`Level::update`], which moves the player, resolves wall collisions and
//! scrolls the camera. Rendering is left to the host: [`Level::visible_tiles`]
//! and [`Level::player_screen_rect`] describe what to draw.
pub mod body;
pub mod camera;
pub mod config;
pub mod constants;
pub mod geometry;
pub mod input;
pub mod level;
pub mod logging;
pub mod map;
pub mod numeric;
pub mod player;
pub mod replay;
pub mod vector_math;
pub use constants::*;

// Re-export commonly used items
pub use body::{KinematicBody, MovementProfile};
pub use camera::{Camera, Viewport};
pub use config::{ConfigError, GameConfig, PlayerConfig};
pub use geometry::Rect;
pub use input::{Axis, Button, InputEvent, InputState};
pub use level::{Level, TileView};
pub use logging::init as init_logging;
pub use map::{MapError, TileCoord, TileIndex, TileMap};
pub use player::{DashProfile, MotionState, PlayerController, SprintProfile};
pub use replay::{InputScript, ReplayError};
pub use vector_math::{vec_mag, vec_normalize};

pub mod prelude {
    //! Prelude exports used in documentation examples.
    //!
    //! ```rust,no_run
    //! use mariana::prelude::*;
    //! ```

    pub use crate::GameConfig;
    pub use crate::InputEvent;
    pub use crate::InputState;
    pub use crate::Level;
    pub use crate::PlayerController;
    pub use crate::TileMap;
    pub use glam::DVec2;
}
