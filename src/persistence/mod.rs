//! Save/load of the high score table
//!
//! Features:
//! - Versioned JSON envelope
//! - Atomic replace (write tmp, then rename over the save)
//! - Missing or corrupt saves recover as an empty table

use std::cell::RefCell;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::highscores::{HighScoreEntry, HighScores};

/// Current envelope version
pub const SAVE_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to encode high scores: {0}")]
    Encode(#[from] serde_json::Error),
}

/// On-disk layout
#[derive(Debug, Serialize, Deserialize)]
struct Envelope {
    version: u32,
    entries: Vec<HighScoreEntry>,
}

/// Durable home of the high score table. The whole table is read and
/// written at once.
pub trait ScoreStore {
    /// Read the table; anything unreadable yields an empty table
    fn load(&self) -> HighScores;
    /// Replace the stored table
    fn save(&mut self, scores: &HighScores) -> Result<(), StoreError>;
}

/// Decode a save file's contents
pub fn decode(json: &str) -> Option<HighScores> {
    let envelope: Envelope = match serde_json::from_str(json) {
        Ok(envelope) => envelope,
        Err(e) => {
            log::warn!("High score save is corrupt: {e}");
            return None;
        }
    };
    if envelope.version != SAVE_VERSION {
        log::warn!(
            "High score save has unsupported version {} (expected {})",
            envelope.version,
            SAVE_VERSION
        );
        return None;
    }
    Some(HighScores::from_entries(envelope.entries))
}

/// Encode a table for saving
pub fn encode(scores: &HighScores) -> Result<String, StoreError> {
    let envelope = Envelope {
        version: SAVE_VERSION,
        entries: scores.entries.clone(),
    };
    Ok(serde_json::to_string_pretty(&envelope)?)
}

/// JSON file on the local filesystem
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

fn io_error(path: &Path, source: io::Error) -> StoreError {
    StoreError::Io {
        path: path.to_path_buf(),
        source,
    }
}

impl ScoreStore for JsonFileStore {
    fn load(&self) -> HighScores {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("No high scores at {}, starting fresh", self.path.display());
                return HighScores::new();
            }
            Err(e) => {
                log::warn!("Could not read {}: {e}", self.path.display());
                return HighScores::new();
            }
        };

        match decode(&json) {
            Some(scores) => {
                log::info!("Loaded {} high scores", scores.entries.len());
                scores
            }
            None => HighScores::new(),
        }
    }

    fn save(&mut self, scores: &HighScores) -> Result<(), StoreError> {
        let json = encode(scores)?;

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| io_error(dir, e))?;
        }
        let tmp = self.tmp_path();
        fs::write(&tmp, json).map_err(|e| io_error(&tmp, e))?;
        fs::rename(&tmp, &self.path).map_err(|e| io_error(&self.path, e))?;

        log::info!("High scores saved ({} entries)", scores.entries.len());
        Ok(())
    }
}

/// In-memory store for headless runs and tests. Clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    saved: Rc<RefCell<Option<String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store preloaded with `scores`
    pub fn with_scores(scores: &HighScores) -> Self {
        let store = Self::new();
        *store.saved.borrow_mut() = encode(scores).ok();
        store
    }

    /// Raw saved JSON, if anything was saved
    pub fn raw(&self) -> Option<String> {
        self.saved.borrow().clone()
    }

    /// Overwrite the raw contents (to simulate corruption)
    pub fn set_raw(&self, json: &str) {
        *self.saved.borrow_mut() = Some(json.to_string());
    }
}

impl ScoreStore for MemoryStore {
    fn load(&self) -> HighScores {
        self.saved
            .borrow()
            .as_deref()
            .and_then(decode)
            .unwrap_or_default()
    }

    fn save(&mut self, scores: &HighScores) -> Result<(), StoreError> {
        *self.saved.borrow_mut() = Some(encode(scores)?);
        Ok(())
    }
}
