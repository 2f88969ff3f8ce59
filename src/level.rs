//! Per-frame orchestration of the player, the map and the camera.
//!
//! [`Level`] is the simulation context: it owns every piece of mutable game
//! state and is advanced exactly once per rendered frame by
//! [`Level::update`].

use std::path::Path;

use glam::DVec2;
use log::{debug, trace};

use crate::camera::Camera;
use crate::config::GameConfig;
use crate::constants::TILE_SIZE;
use crate::geometry::Rect;
use crate::input::{acceleration_from_axes, FrameIntent, InputEvent, InputState};
use crate::map::{MapError, TileCoord, TileIndex, TileMap};
use crate::numeric::world_to_tile;
use crate::player::PlayerController;

/// A tile as the renderer needs it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileView {
    /// Grid position.
    pub coord: TileCoord,
    /// Screen-space rectangle.
    pub rect: Rect,
    /// Floor tile, if any.
    pub floor: Option<TileIndex>,
    /// Wall tile drawn over the floor, if any.
    pub wall: Option<TileIndex>,
    /// Whether the floor tile needs alpha blending.
    pub floor_alpha: bool,
    /// Whether the wall tile needs alpha blending.
    pub wall_alpha: bool,
}

/// The running game: map, player and camera.
#[derive(Debug, Clone)]
pub struct Level {
    map: TileMap,
    player: PlayerController,
    camera: Camera,
    frame: u64,
}

impl Level {
    /// Builds a level on `map` with the player in the map's spawn tile.
    #[must_use]
    pub fn new(map: TileMap, config: &GameConfig) -> Self {
        let spawn = map.spawn();
        let mut level = Self {
            player: config.player.spawn(DVec2::ZERO),
            camera: Camera::new(config.viewport),
            map,
            frame: 0,
        };
        level.spawn_player_at_tile(spawn);
        level
    }

    /// Loads a map file and builds a level on it.
    ///
    /// # Errors
    ///
    /// Returns [`MapError`] when the map or its tileset metadata cannot be
    /// loaded.
    pub fn load(path: impl AsRef<Path>, config: &GameConfig) -> Result<Self, MapError> {
        TileMap::load(path).map(|map| Self::new(map, config))
    }

    /// Places the player centred in `tile` and centres the camera on it.
    pub fn spawn_player_at_tile(&mut self, tile: TileCoord) {
        let corner = tile.world_rect().corner();
        let inset = ((DVec2::splat(TILE_SIZE) - self.player.body.size) / 2.0).trunc();
        self.player.body.position = corner + inset;
        let bounds = self.map.camera_bounds(self.camera.viewport().size());
        self.camera.center_on(self.player.body.position, &bounds);
        debug!(
            "spawned player at tile ({}, {}) -> {:?}",
            tile.x, tile.y, self.player.body.position
        );
    }

    /// Advances the simulation by one frame.
    ///
    /// `events` is drained; `state` is the continuous input snapshot taken
    /// after those events happened.
    pub fn update(&mut self, delta: f64, events: &mut Vec<InputEvent>, state: &InputState) {
        self.frame += 1;
        self.update_player(delta, events, state);
        let collided = self.resolve_collisions();
        let bounds = self.map.camera_bounds(self.camera.viewport().size());
        self.camera.follow(self.player.bounding_box(), &bounds);
        trace!(
            "frame {}: pos {:?} vel {:?} state {:?} collided {collided} camera {:?}",
            self.frame,
            self.player.body.position,
            self.player.body.velocity,
            self.player.motion_state(),
            self.camera.offset()
        );
    }

    fn update_player(&mut self, delta: f64, events: &mut Vec<InputEvent>, state: &InputState) {
        let intent = FrameIntent::drain(events, self.player.is_sprinting);

        if intent.axis_moved {
            self.player.body.acceleration =
                acceleration_from_axes(state.axes(), self.player.body.profile.max_acceleration);
        }
        if intent.dash_pressed {
            self.player.dash();
        }
        if intent.dash_released {
            self.player.rearm_dash();
        }
        if intent.sprint != self.player.is_sprinting {
            debug!("sprint {}", if intent.sprint { "on" } else { "off" });
        }
        self.player.is_sprinting = intent.sprint;

        self.player.update(delta);
    }

    /// Pushes the player back out of any collider it moved into.
    ///
    /// For each overlapping collider the displacement still applied this
    /// frame is undone, then each axis is re-applied only if moving along it
    /// alone stays clear of that collider. This lets the player slide along
    /// walls. An axis cancelled by one collider stays cancelled for the rest.
    fn resolve_collisions(&mut self) -> bool {
        let mut applied = self.player.body.last_step();
        let mut collided = false;
        for &cell in self.map.colliders() {
            let wall = self.map.collider_rect(cell);
            if !self.player.bounding_box().intersects(&wall) {
                continue;
            }
            let body = &mut self.player.body;
            body.position -= applied;
            let reverted = body.bounding_box();
            if reverted.translated(DVec2::new(applied.x, 0.0)).intersects(&wall) {
                applied.x = 0.0;
            }
            if reverted.translated(DVec2::new(0.0, applied.y)).intersects(&wall) {
                applied.y = 0.0;
            }
            body.position += applied;
            self.player.handle_collision();
            collided = true;
            trace!("collision with cell ({}, {})", cell.x, cell.y);
        }
        if !collided {
            self.player.on_wall = false;
        }
        collided
    }

    /// The static map.
    #[must_use]
    pub const fn map(&self) -> &TileMap {
        &self.map
    }

    /// The player.
    #[must_use]
    pub const fn player(&self) -> &PlayerController {
        &self.player
    }

    /// Mutable access to the player, for scripted setups.
    pub const fn player_mut(&mut self) -> &mut PlayerController {
        &mut self.player
    }

    /// The camera.
    #[must_use]
    pub const fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Frames simulated so far.
    #[must_use]
    pub const fn frame(&self) -> u64 {
        self.frame
    }

    /// Player rectangle in screen space.
    #[must_use]
    pub fn player_screen_rect(&self) -> Rect {
        self.camera.to_screen(self.player.bounding_box())
    }

    /// Tile rectangle in screen space.
    #[must_use]
    pub fn tile_screen_rect(&self, coord: TileCoord) -> Rect {
        self.camera.to_screen(coord.world_rect())
    }

    /// Tiles overlapping the viewport, row by row.
    #[must_use]
    pub fn visible_tiles(&self) -> Vec<TileView> {
        let offset = self.camera.offset();
        let far = offset + self.camera.viewport().size();
        let max_x = self.map.width().saturating_sub(1);
        let max_y = self.map.height().saturating_sub(1);
        let columns = world_to_tile(offset.x, TILE_SIZE, max_x)..=world_to_tile(far.x, TILE_SIZE, max_x);
        let rows = world_to_tile(offset.y, TILE_SIZE, max_y)..=world_to_tile(far.y, TILE_SIZE, max_y);
        let screen = self.camera.screen_rect();

        let mut tiles = Vec::new();
        for y in rows {
            for x in columns.clone() {
                let coord = TileCoord::new(x, y);
                let rect = self.tile_screen_rect(coord);
                if !rect.intersects(&screen) {
                    continue;
                }
                let (Ok(floor), Ok(wall)) = (self.map.tile_at(x, y), self.map.wall_at(x, y)) else {
                    continue;
                };
                tiles.push(TileView {
                    coord,
                    rect,
                    floor,
                    wall,
                    floor_alpha: floor.is_some_and(|t| self.map.is_alpha(t)),
                    wall_alpha: wall.is_some_and(|t| self.map.is_alpha(t)),
                });
            }
        }
        tiles
    }
}
