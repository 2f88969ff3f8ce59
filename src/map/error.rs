//! Errors raised while loading or querying a tile map.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong with a map.
///
/// Load failures are fatal by policy: callers should refuse to start a level
/// rather than patch the map up.
#[derive(Debug, Error)]
pub enum MapError {
    /// The map or tileset metadata file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// A line could not be understood.
    #[error("line {line}: {detail}")]
    Syntax {
        /// One-based line number in the offending file.
        line: usize,
        /// Description of the problem.
        detail: String,
    },
    /// A required header key never appeared.
    #[error("missing required key `{0}`")]
    MissingKey(&'static str),
    /// A layer block was absent.
    #[error("missing `{0}` layer")]
    MissingLayer(&'static str),
    /// A layer block had the wrong number of rows.
    #[error("`{layer}` layer has {found} rows, expected {expected}")]
    RowCount {
        /// Layer name.
        layer: &'static str,
        /// Rows the header promised.
        expected: u32,
        /// Rows actually present.
        found: usize,
    },
    /// The spawn tile lies outside the grid.
    #[error("spawn tile ({x}, {y}) is outside the map")]
    SpawnOutOfBounds {
        /// Column.
        x: u32,
        /// Row.
        y: u32,
    },
    /// A lookup addressed a cell outside the grid.
    #[error("tile ({x}, {y}) is outside a {width}x{height} map")]
    OutOfBounds {
        /// Requested column.
        x: u32,
        /// Requested row.
        y: u32,
        /// Map width in tiles.
        width: u32,
        /// Map height in tiles.
        height: u32,
    },
}

impl MapError {
    pub(crate) fn syntax(line: usize, detail: impl Into<String>) -> Self {
        Self::Syntax {
            line,
            detail: detail.into(),
        }
    }
}
