//! Scripted input for headless runs.
//!
//! A script is a JSON list of frames. Each frame carries the event tags the
//! input collaborator would have queued and the snapshot it would have
//! reported, plus an optional repeat count:
//!
//! ```json
//! { "frames": [
//!     { "events": ["AxisMoved:Axis Player Horiz"], "state": { "horizontal": 1.0 } },
//!     { "state": { "horizontal": 1.0 }, "repeat": 30 }
//! ] }
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;
use thiserror::Error;

use crate::input::{InputError, InputEvent, InputState};
use crate::level::Level;

/// Errors raised while loading a script.
#[derive(Debug, Error)]
pub enum ReplayError {
    /// The file could not be read.
    #[error("failed to read script {}: {source}", path.display())]
    Io {
        /// Script path.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The JSON did not match the script shape.
    #[error("malformed script: {0}")]
    Parse(#[from] serde_json::Error),
    /// An event tag was not recognised.
    #[error("frame {frame}: {source}")]
    Event {
        /// Index of the offending frame entry.
        frame: usize,
        /// Why the tag was rejected.
        #[source]
        source: InputError,
    },
}

#[derive(Debug, Deserialize)]
struct RawScript {
    frames: Vec<RawFrame>,
}

#[derive(Debug, Deserialize)]
struct RawFrame {
    #[serde(default)]
    events: Vec<String>,
    #[serde(default)]
    state: InputState,
    #[serde(default = "one")]
    repeat: u32,
}

const fn one() -> u32 {
    1
}

/// One scripted frame, possibly repeated.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptFrame {
    /// Events queued on the first repetition only.
    pub events: Vec<InputEvent>,
    /// Snapshot reported on every repetition.
    pub state: InputState,
    /// How many frames this entry lasts.
    pub repeat: u32,
}

/// A decoded input script.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InputScript {
    /// Frames in playback order.
    pub frames: Vec<ScriptFrame>,
}

impl InputScript {
    /// Reads a script from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`ReplayError`] when the file is unreadable, malformed or
    /// contains unknown event tags.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ReplayError> {
        let file = path.as_ref();
        let text = fs::read_to_string(file).map_err(|source| ReplayError::Io {
            path: file.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Decodes a script from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ReplayError`] when the text is malformed or contains
    /// unknown event tags.
    pub fn from_json_str(text: &str) -> Result<Self, ReplayError> {
        let raw: RawScript = serde_json::from_str(text)?;
        let frames = raw
            .frames
            .into_iter()
            .enumerate()
            .map(|(frame, entry)| {
                let events = entry
                    .events
                    .iter()
                    .map(|tag| tag.parse::<InputEvent>())
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(|source| ReplayError::Event { frame, source })?;
                Ok(ScriptFrame {
                    events,
                    state: entry.state,
                    repeat: entry.repeat,
                })
            })
            .collect::<Result<Vec<_>, ReplayError>>()?;
        Ok(Self { frames })
    }

    /// Total frames the script lasts.
    #[must_use]
    pub fn len_frames(&self) -> u64 {
        self.frames.iter().map(|f| u64::from(f.repeat)).sum()
    }

    /// Plays the script into `level`, then idles with the last snapshot
    /// until `min_frames` frames have run. Returns the frames simulated.
    pub fn play(&self, level: &mut Level, delta: f64, min_frames: u64) -> u64 {
        let mut frames = 0_u64;
        let mut last = InputState::default();
        for entry in &self.frames {
            let mut queue = entry.events.clone();
            for _ in 0..entry.repeat {
                level.update(delta, &mut queue, &entry.state);
                frames += 1;
            }
            last = entry.state;
        }
        while frames < min_frames {
            level.update(delta, &mut Vec::new(), &last);
            frames += 1;
        }
        info!(
            "replayed {frames} frames; player at {:?}, camera at {:?}",
            level.player().body.position,
            level.camera().offset()
        );
        frames
    }
}
