//! Utility helpers for tests.
//!
//! Builders for map text and ready-made players so integration tests can
//! describe a scenario in a line or two.

use anyhow::{Context, Result};
use glam::DVec2;
use hashbrown::HashSet;
use mariana::{
    DashProfile, GameConfig, Level, MovementProfile, PlayerController, SprintProfile, TileIndex,
    TileMap,
};

/// Floor tile used by [`MapText`], one-based as written in map files.
pub const FLOOR_TILE: u32 = 1;
/// Wall tile used by [`MapText`], one-based as written in map files.
pub const WALL_TILE: u32 = 2;

/// Builder for the line-oriented map format.
///
/// # Examples
/// ```
/// use test_utils::MapText;
/// let text = MapText::new(3, 2).wall(2, 0).render();
/// assert!(text.contains("layer=wall\n0,0,2\n0,0,0\n"));
/// ```
#[derive(Debug, Clone)]
pub struct MapText {
    width: u32,
    height: u32,
    spawn: (u32, u32),
    walls: HashSet<(u32, u32)>,
}

impl MapText {
    /// An all-floor map without walls.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            spawn: (0, 0),
            walls: HashSet::new(),
        }
    }

    /// A map whose outer ring of cells is wall.
    #[must_use]
    pub fn bordered(width: u32, height: u32) -> Self {
        let mut text = Self::new(width, height);
        for x in 0..width {
            text.walls.insert((x, 0));
            text.walls.insert((x, height.saturating_sub(1)));
        }
        for y in 0..height {
            text.walls.insert((0, y));
            text.walls.insert((width.saturating_sub(1), y));
        }
        text
    }

    /// Places a wall at `(x, y)`.
    #[must_use]
    pub fn wall(mut self, x: u32, y: u32) -> Self {
        self.walls.insert((x, y));
        self
    }

    /// Sets the spawn tile.
    #[must_use]
    pub const fn spawn(mut self, x: u32, y: u32) -> Self {
        self.spawn = (x, y);
        self
    }

    /// Renders the map file text.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = format!(
            "tileset=test\nalpha-tileset=test.tileset\nwidth={}\nheight={}\nspawn={},{}\n",
            self.width, self.height, self.spawn.0, self.spawn.1
        );
        out.push_str("layer=floor\n");
        for _ in 0..self.height {
            out.push_str(&self.row(|_| FLOOR_TILE));
        }
        out.push_str("layer=wall\n");
        for y in 0..self.height {
            out.push_str(&self.row(|x| {
                if self.walls.contains(&(x, y)) {
                    WALL_TILE
                } else {
                    0
                }
            }));
        }
        out
    }

    fn row(&self, cell: impl Fn(u32) -> u32) -> String {
        let cells: Vec<String> = (0..self.width).map(|x| cell(x).to_string()).collect();
        format!("{}\n", cells.join(","))
    }

    /// Parses the rendered text into a [`TileMap`] with the given
    /// zero-based alpha tiles.
    ///
    /// # Errors
    /// Returns an error when the rendered map is rejected.
    pub fn build(&self, alphas: &[TileIndex]) -> Result<TileMap> {
        TileMap::from_text(&self.render(), alphas.iter().copied().collect())
            .context("rendered map text should parse")
    }

    /// Builds a level on this map with default tuning.
    ///
    /// # Errors
    /// Returns an error when the rendered map is rejected.
    pub fn level(&self) -> Result<Level> {
        Ok(Level::new(self.build(&[])?, &GameConfig::default()))
    }
}

/// Default movement tuning with deceleration switched off.
#[must_use]
pub fn frictionless() -> MovementProfile {
    MovementProfile {
        deceleration_rate: 0.0,
        ..MovementProfile::default()
    }
}

/// A 20x36 player at `position` with default dash and sprint tuning.
#[must_use]
pub fn player_at(position: DVec2, movement: MovementProfile) -> PlayerController {
    PlayerController::new(
        position,
        DVec2::new(20.0, 36.0),
        movement,
        DashProfile::default(),
        SprintProfile::default(),
    )
}

/// Asserts the player's speed does not exceed `cap` beyond rounding.
///
/// # Panics
/// Panics when the speed is above `cap`.
pub fn assert_speed_within(player: &PlayerController, cap: f64) {
    let speed = player.speed();
    assert!(
        speed <= cap + 1e-9,
        "speed {speed} exceeds cap {cap} (velocity {:?})",
        player.body.velocity
    );
}
