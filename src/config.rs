//! Tunable game settings.
//!
//! Every field has a default matching the shipped prototype feel, so a
//! config file only needs to name what it changes:
//!
//! ```
//! use mariana::config::GameConfig;
//! let config = GameConfig::from_json_str(r#"{ "player": { "dash": { "dash_speed": 12.0 } } }"#)
//!     .expect("config parses");
//! assert_eq!(config.player.dash.dash_speed, 12.0);
//! assert_eq!(config.player.movement.max_velocity, 5.0);
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use glam::DVec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::body::MovementProfile;
use crate::camera::Viewport;
use crate::player::{DashProfile, PlayerController, SprintProfile};

/// Errors raised while loading a [`GameConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        /// Config file path.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The JSON did not match the expected shape.
    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),
    /// A value was out of its allowed range.
    #[error("invalid config value `{field}`: {detail}")]
    Invalid {
        /// Dotted path of the offending field.
        field: &'static str,
        /// Why the value was rejected.
        detail: String,
    },
}

/// Player tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Bounding box width.
    pub width: f64,
    /// Bounding box height.
    pub height: f64,
    /// Base acceleration, velocity cap and deceleration.
    pub movement: MovementProfile,
    /// Dash tuning.
    pub dash: DashProfile,
    /// Sprint tuning.
    pub sprint: SprintProfile,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            width: 20.0,
            height: 36.0,
            movement: MovementProfile::default(),
            dash: DashProfile::default(),
            sprint: SprintProfile::default(),
        }
    }
}

impl PlayerConfig {
    /// Builds a player at `position` with this tuning.
    #[must_use]
    pub const fn spawn(&self, position: DVec2) -> PlayerController {
        PlayerController::new(
            position,
            self.size(),
            self.movement,
            self.dash,
            self.sprint,
        )
    }

    /// Bounding box size.
    #[must_use]
    pub const fn size(&self) -> DVec2 {
        DVec2::new(self.width, self.height)
    }
}

/// Top-level settings for a play session.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Visible area.
    pub viewport: Viewport,
    /// Player tuning.
    pub player: PlayerConfig,
}

impl GameConfig {
    /// Reads and validates a JSON config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be read, is malformed,
    /// or holds out-of-range values.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let file = path.as_ref();
        let text = fs::read_to_string(file).map_err(|source| ConfigError::Io {
            path: file.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Parses and validates a JSON config document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the JSON is malformed or holds
    /// out-of-range values.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every value is finite and within range.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let player = &self.player;
        let checks: [(&'static str, f64, bool); 11] = [
            ("viewport.width", self.viewport.width, false),
            ("viewport.height", self.viewport.height, false),
            ("player.width", player.width, false),
            ("player.height", player.height, false),
            ("player.movement.max_acceleration", player.movement.max_acceleration, true),
            ("player.movement.max_velocity", player.movement.max_velocity, true),
            ("player.movement.deceleration_rate", player.movement.deceleration_rate, true),
            ("player.dash.dash_speed", player.dash.dash_speed, true),
            ("player.dash.dash_duration", player.dash.dash_duration, true),
            ("player.sprint.sprint_speed", player.sprint.sprint_speed, true),
            (
                "player.sprint.sprint_acceleration_multiplier",
                player.sprint.sprint_acceleration_multiplier,
                true,
            ),
        ];
        for (field, value, zero_allowed) in checks {
            let ok = value.is_finite() && (value > 0.0 || (zero_allowed && value == 0.0));
            if !ok {
                return Err(ConfigError::Invalid {
                    field,
                    detail: format!("expected a finite positive value, got {value}"),
                });
            }
        }
        let multiplier = player.dash.dash_decel_multiplier;
        if !multiplier.is_finite() || multiplier < 0.0 {
            return Err(ConfigError::Invalid {
                field: "player.dash.dash_decel_multiplier",
                detail: format!("expected a finite non-negative value, got {multiplier}"),
            });
        }
        Ok(())
    }
}
