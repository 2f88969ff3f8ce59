//! Parsers for the line-oriented map and tileset metadata formats.
//!
//! A map file opens with `key=value` headers and carries one block of rows
//! per layer:
//!
//! ```text
//! tileset=frens
//! alpha-tileset=frens.tileset
//! width=3
//! height=2
//! spawn=1,0
//! layer=floor
//! 1,1,1
//! 1,2,1
//! layer=wall
//! 0,0,5
//! 0,0,5
//! ```
//!
//! Tile indices are one-based in the file and zero-based in memory; `0`
//! means "no tile". Blank lines and lines starting with `#` are skipped.

use hashbrown::HashSet;

use super::error::MapError;
use super::TileIndex;

/// Which grid a block of rows belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Layer {
    Floor,
    Wall,
}

impl Layer {
    const fn name(self) -> &'static str {
        match self {
            Self::Floor => "floor",
            Self::Wall => "wall",
        }
    }
}

/// Parsed, validated contents of a map file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MapDescription {
    pub tileset: String,
    pub alpha_tileset: String,
    pub width: u32,
    pub height: u32,
    pub spawn: (u32, u32),
    pub floor: Vec<Option<TileIndex>>,
    pub wall: Vec<Option<TileIndex>>,
}

#[derive(Default)]
struct Builder {
    tileset: Option<String>,
    alpha_tileset: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
    spawn: Option<(u32, u32)>,
    floor: Option<Vec<Vec<Option<TileIndex>>>>,
    wall: Option<Vec<Vec<Option<TileIndex>>>>,
    current: Option<Layer>,
}

impl Builder {
    fn header(&mut self, line: usize, key: &str, value: &str) -> Result<(), MapError> {
        match key {
            "tileset" => self.tileset = Some(value.to_owned()),
            "alpha-tileset" => self.alpha_tileset = Some(value.to_owned()),
            "width" => self.width = Some(parse_dimension(line, key, value)?),
            "height" => self.height = Some(parse_dimension(line, key, value)?),
            "spawn" => self.spawn = Some(parse_spawn(line, value)?),
            "layer" => self.open_layer(line, value)?,
            other => return Err(MapError::syntax(line, format!("unknown key `{other}`"))),
        }
        Ok(())
    }

    fn open_layer(&mut self, line: usize, value: &str) -> Result<(), MapError> {
        if self.width.is_none() {
            return Err(MapError::syntax(line, "`width` must precede the first layer"));
        }
        let (layer, slot) = match value {
            "floor" => (Layer::Floor, &mut self.floor),
            "wall" => (Layer::Wall, &mut self.wall),
            other => return Err(MapError::syntax(line, format!("unknown layer `{other}`"))),
        };
        if slot.is_some() {
            return Err(MapError::syntax(
                line,
                format!("duplicate `{}` layer", layer.name()),
            ));
        }
        *slot = Some(Vec::new());
        self.current = Some(layer);
        Ok(())
    }

    fn row(&mut self, line: usize, text: &str) -> Result<(), MapError> {
        let Some(layer) = self.current else {
            return Err(MapError::syntax(line, "tile row outside of a layer"));
        };
        let width = self.width.unwrap_or_default();
        let cells = text
            .split(',')
            .map(|cell| parse_cell(line, cell.trim()))
            .collect::<Result<Vec<_>, _>>()?;
        if u32::try_from(cells.len()).ok() != Some(width) {
            return Err(MapError::syntax(
                line,
                format!("row has {} tiles, expected {width}", cells.len()),
            ));
        }
        let slot = match layer {
            Layer::Floor => &mut self.floor,
            Layer::Wall => &mut self.wall,
        };
        if let Some(rows) = slot.as_mut() {
            rows.push(cells);
        }
        Ok(())
    }

    fn finish(self) -> Result<MapDescription, MapError> {
        let tileset = self.tileset.ok_or(MapError::MissingKey("tileset"))?;
        let alpha_tileset = self
            .alpha_tileset
            .ok_or(MapError::MissingKey("alpha-tileset"))?;
        let width = self.width.ok_or(MapError::MissingKey("width"))?;
        let height = self.height.ok_or(MapError::MissingKey("height"))?;
        let floor = flatten(Layer::Floor, self.floor, height)?;
        let wall = flatten(Layer::Wall, self.wall, height)?;
        let spawn = self.spawn.unwrap_or((0, 0));
        if spawn.0 >= width || spawn.1 >= height {
            return Err(MapError::SpawnOutOfBounds {
                x: spawn.0,
                y: spawn.1,
            });
        }
        Ok(MapDescription {
            tileset,
            alpha_tileset,
            width,
            height,
            spawn,
            floor,
            wall,
        })
    }
}

fn flatten(
    layer: Layer,
    block: Option<Vec<Vec<Option<TileIndex>>>>,
    height: u32,
) -> Result<Vec<Option<TileIndex>>, MapError> {
    let rows = block.ok_or_else(|| MapError::MissingLayer(layer.name()))?;
    if u32::try_from(rows.len()).ok() != Some(height) {
        return Err(MapError::RowCount {
            layer: layer.name(),
            expected: height,
            found: rows.len(),
        });
    }
    Ok(rows.into_iter().flatten().collect())
}

fn parse_dimension(line: usize, key: &str, value: &str) -> Result<u32, MapError> {
    match value.parse::<u32>() {
        Ok(0) => Err(MapError::syntax(line, format!("`{key}` must be positive"))),
        Ok(n) => Ok(n),
        Err(err) => Err(MapError::syntax(line, format!("bad `{key}` value `{value}`: {err}"))),
    }
}

fn parse_spawn(line: usize, value: &str) -> Result<(u32, u32), MapError> {
    let parse = |part: &str| {
        part.trim()
            .parse::<u32>()
            .map_err(|err| MapError::syntax(line, format!("bad spawn coordinate `{part}`: {err}")))
    };
    let (x, y) = value
        .split_once(',')
        .ok_or_else(|| MapError::syntax(line, "spawn must be `x,y`"))?;
    Ok((parse(x)?, parse(y)?))
}

fn parse_cell(line: usize, cell: &str) -> Result<Option<TileIndex>, MapError> {
    cell.parse::<u32>()
        .map(|index| index.checked_sub(1))
        .map_err(|err| MapError::syntax(line, format!("bad tile index `{cell}`: {err}")))
}

/// Parses the text of a map file.
pub(crate) fn parse_map(text: &str) -> Result<MapDescription, MapError> {
    let mut builder = Builder::default();
    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        match trimmed.split_once('=') {
            Some((key, value)) => builder.header(line, key.trim(), value.trim())?,
            None => builder.row(line, trimmed)?,
        }
    }
    builder.finish()
}

/// Parses a tileset metadata file into the set of zero-based alpha tiles.
///
/// Only the `alphas=` key is recognised; other keys are ignored so the
/// metadata can grow without breaking older builds.
pub(crate) fn parse_tileset_meta(text: &str) -> Result<HashSet<TileIndex>, MapError> {
    let mut alphas = HashSet::new();
    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let Some((key, value)) = raw.trim().split_once('=') else {
            continue;
        };
        if key.trim() != "alphas" {
            continue;
        }
        for cell in value.split(',').map(str::trim).filter(|c| !c.is_empty()) {
            match parse_cell(line, cell)? {
                Some(tile) => {
                    alphas.insert(tile);
                }
                None => return Err(MapError::syntax(line, "alpha tile indices start at 1")),
            }
        }
    }
    Ok(alphas)
}
