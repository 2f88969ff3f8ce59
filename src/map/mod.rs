//! Static tile world: floor and wall grids, colliders and bounds.
//!
//! A [`TileMap`] is built once when a level loads and never changes during
//! play. Every wall tile is solid; floor tiles are purely decorative.
//! Loading is strict: a map that fails validation is rejected outright so a
//! malformed level can never start.

mod error;
mod parse;

use std::fs;
use std::path::{Path, PathBuf};

use glam::DVec2;
use hashbrown::HashSet;
use log::{debug, info};

use crate::constants::TILE_SIZE;
use crate::geometry::Rect;

pub use error::MapError;

/// Zero-based index of a tile within its tileset image.
pub type TileIndex = u32;

/// A cell position on the tile grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileCoord {
    /// Column.
    pub x: u32,
    /// Row.
    pub y: u32,
}

impl TileCoord {
    /// Creates a coordinate.
    #[must_use]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// World-space rectangle covered by this cell.
    #[must_use]
    pub fn world_rect(self) -> Rect {
        Rect::new(
            f64::from(self.x) * TILE_SIZE,
            f64::from(self.y) * TILE_SIZE,
            TILE_SIZE,
            TILE_SIZE,
        )
    }
}

/// Range the camera offset may take on each axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraBounds {
    /// Smallest horizontal offset.
    pub min_x: f64,
    /// Largest horizontal offset.
    pub max_x: f64,
    /// Smallest vertical offset.
    pub min_y: f64,
    /// Largest vertical offset.
    pub max_y: f64,
}

impl CameraBounds {
    /// Clamps an offset into the bounds.
    #[must_use]
    pub const fn clamp(&self, offset: DVec2) -> DVec2 {
        DVec2::new(
            offset.x.clamp(self.min_x, self.max_x),
            offset.y.clamp(self.min_y, self.max_y),
        )
    }
}

/// The static world a level is played on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileMap {
    tileset: String,
    width: u32,
    height: u32,
    floor: Vec<Option<TileIndex>>,
    wall: Vec<Option<TileIndex>>,
    alphas: HashSet<TileIndex>,
    colliders: Vec<TileCoord>,
    spawn: TileCoord,
}

impl TileMap {
    /// Loads a map file and the tileset metadata it references.
    ///
    /// The metadata path named by `alpha-tileset=` is resolved relative to
    /// the map file's directory.
    ///
    /// # Errors
    ///
    /// Returns [`MapError`] when either file is missing or unreadable, or
    /// when the map text fails validation.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, MapError> {
        let map_path = path.as_ref();
        let text = read(map_path)?;
        let description = parse::parse_map(&text)?;
        let meta_path = map_path
            .parent()
            .unwrap_or_else(|| Path::new(""))
            .join(&description.alpha_tileset);
        let alphas = parse::parse_tileset_meta(&read(&meta_path)?)?;
        let map = Self::from_description(description, alphas);
        info!(
            "loaded map {} ({}x{} tiles, {} colliders, tileset `{}`)",
            map_path.display(),
            map.width,
            map.height,
            map.colliders.len(),
            map.tileset
        );
        Ok(map)
    }

    /// Parses map text with an already-known alpha tile set.
    ///
    /// # Errors
    ///
    /// Returns [`MapError`] when the text fails validation.
    pub fn from_text(text: &str, alphas: HashSet<TileIndex>) -> Result<Self, MapError> {
        parse::parse_map(text).map(|description| Self::from_description(description, alphas))
    }

    fn from_description(description: parse::MapDescription, alphas: HashSet<TileIndex>) -> Self {
        let width = description.width;
        let colliders: Vec<TileCoord> = (0..description.height)
            .flat_map(|y| (0..width).map(move |x| TileCoord::new(x, y)))
            .zip(&description.wall)
            .filter_map(|(coord, wall)| wall.as_ref().map(|_| coord))
            .collect();
        debug!("derived {} collider cells", colliders.len());
        Self {
            tileset: description.tileset,
            width,
            height: description.height,
            floor: description.floor,
            wall: description.wall,
            alphas,
            colliders,
            spawn: TileCoord::new(description.spawn.0, description.spawn.1),
        }
    }

    /// Width in tiles.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in tiles.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Width in world units.
    #[must_use]
    pub fn width_px(&self) -> f64 {
        f64::from(self.width) * TILE_SIZE
    }

    /// Height in world units.
    #[must_use]
    pub fn height_px(&self) -> f64 {
        f64::from(self.height) * TILE_SIZE
    }

    /// Name of the tileset image the indices refer to.
    #[must_use]
    pub fn tileset(&self) -> &str {
        &self.tileset
    }

    /// Tile the player spawns in.
    #[must_use]
    pub const fn spawn(&self) -> TileCoord {
        self.spawn
    }

    /// Solid cells, in row-major order.
    #[must_use]
    pub fn colliders(&self) -> &[TileCoord] {
        &self.colliders
    }

    /// World-space rectangle of a collider cell.
    #[must_use]
    pub fn collider_rect(&self, cell: TileCoord) -> Rect {
        cell.world_rect()
    }

    /// Floor tile at a cell; `None` when the cell has no floor.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::OutOfBounds`] for cells outside the grid.
    pub fn tile_at(&self, x: u32, y: u32) -> Result<Option<TileIndex>, MapError> {
        self.lookup(&self.floor, x, y)
    }

    /// Wall tile at a cell; `None` when the cell has no wall.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::OutOfBounds`] for cells outside the grid.
    pub fn wall_at(&self, x: u32, y: u32) -> Result<Option<TileIndex>, MapError> {
        self.lookup(&self.wall, x, y)
    }

    /// Whether a tile needs per-pixel transparency when drawn.
    #[must_use]
    pub fn is_alpha(&self, tile: TileIndex) -> bool {
        self.alphas.contains(&tile)
    }

    /// Offsets the camera may take for a viewport of the given size.
    ///
    /// Maps smaller than the viewport pin the camera at zero on that axis.
    #[must_use]
    pub fn camera_bounds(&self, viewport: DVec2) -> CameraBounds {
        CameraBounds {
            min_x: 0.0,
            max_x: (self.width_px() - viewport.x).max(0.0),
            min_y: 0.0,
            max_y: (self.height_px() - viewport.y).max(0.0),
        }
    }

    fn lookup(
        &self,
        layer: &[Option<TileIndex>],
        x: u32,
        y: u32,
    ) -> Result<Option<TileIndex>, MapError> {
        let out_of_bounds = || MapError::OutOfBounds {
            x,
            y,
            width: self.width,
            height: self.height,
        };
        if x >= self.width || y >= self.height {
            return Err(out_of_bounds());
        }
        let index = usize::try_from(u64::from(y) * u64::from(self.width) + u64::from(x))
            .map_err(|_| out_of_bounds())?;
        layer.get(index).copied().ok_or_else(out_of_bounds)
    }
}

fn read(path: &Path) -> Result<String, MapError> {
    fs::read_to_string(path).map_err(|source| MapError::Io {
        path: PathBuf::from(path),
        source,
    })
}
