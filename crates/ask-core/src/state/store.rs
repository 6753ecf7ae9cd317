//! Loading and saving the state document.

use super::State;
use crate::config::{STATE_FILE_NAME, resolve_home_dir};
use crate::error::{Error, Result};
use crate::safe_io::atomic_write_json;
use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

/// Handle on the location of the state document.
///
/// The store holds no state of its own; every `load` re-reads the file and
/// every `save` rewrites it whole. Concurrent processes are not coordinated:
/// the last `save` wins.
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    /// Store backed by an explicit document path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store backed by `config.json` inside `home`.
    pub fn from_home(home: &Path) -> Self {
        Self::new(home.join(STATE_FILE_NAME))
    }

    /// Store at the resolved home directory (`--home`, `ASK_HOME`, `~/.ask`).
    pub fn default_location(home_override: Option<PathBuf>) -> Result<Self> {
        let home = resolve_home_dir(home_override).ok_or_else(|| {
            Error::io(
                "failed to locate",
                "~/.ask",
                io::Error::new(ErrorKind::NotFound, "home directory not found"),
            )
        })?;
        Ok(Self::from_home(&home))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the document. A missing file yields `State::default()`.
    pub fn load(&self) -> Result<State> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("no state at {}, starting fresh", self.path.display());
                return Ok(State::default());
            }
            Err(e) => return Err(Error::io("failed to read", &self.path, e)),
        };

        serde_json::from_str(&content).map_err(|source| Error::Parse {
            path: self.path.clone(),
            source,
        })
    }

    /// Write the whole document, creating the containing directory if needed.
    ///
    /// On failure the previous document on disk is left intact.
    pub fn save(&self, state: &State) -> Result<()> {
        atomic_write_json(&self.path, state)
            .map_err(|e| Error::io("failed to write", &self.path, e))?;
        log::debug!("saved state to {}", self.path.display());
        Ok(())
    }
}
