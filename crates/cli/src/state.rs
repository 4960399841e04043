//! JSON state file standing in for browser storage.

use std::io::ErrorKind;
use std::path::PathBuf;

use storegate_core::{ConfigError, MemoryStore, RoleError};
use thiserror::Error;
use tracing::debug;

/// Default state file, relative to the working directory.
const DEFAULT_STATE_FILE: &str = ".storegate.json";

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Page configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// State file could not be read or written.
    #[error("State file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// State file is not valid JSON.
    #[error("State file {} is corrupt: {source}", .path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Role given on the command line is not recognized.
    #[error(transparent)]
    InvalidRole(#[from] RoleError),

    /// Output could not be serialized.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Location of the simulated browser storage.
#[derive(Debug, Clone)]
pub struct StateFile {
    path: PathBuf,
}

impl StateFile {
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Resolve the path from `STOREGATE_STATE_FILE`.
    pub fn from_env() -> Self {
        let path = std::env::var("STOREGATE_STATE_FILE")
            .unwrap_or_else(|_| DEFAULT_STATE_FILE.to_owned());
        Self::new(PathBuf::from(path))
    }

    /// Load the store. A missing file is an empty browser.
    pub fn load(&self) -> Result<MemoryStore, CliError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No state file, starting empty");
                return Ok(MemoryStore::new());
            }
            Err(source) => {
                return Err(CliError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let snapshot = serde_json::from_str(&content).map_err(|source| CliError::Corrupt {
            path: self.path.clone(),
            source,
        })?;
        Ok(MemoryStore::from_snapshot(snapshot))
    }

    /// Write the store back.
    pub fn save(&self, store: &MemoryStore) -> Result<(), CliError> {
        let content = serde_json::to_string_pretty(&store.snapshot())?;
        debug!(path = %self.path.display(), "Saving state file");
        std::fs::write(&self.path, content).map_err(|source| CliError::Io {
            path: self.path.clone(),
            source,
        })
    }
}
