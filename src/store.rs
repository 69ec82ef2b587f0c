//! Snapshot persistence for the ledger state.
//!
//! A snapshot is the CBOR encoding of [`LedgerState`]. Writes go to a
//! sibling temp file first and are renamed into place, so a crash never
//! leaves a half-written snapshot behind.

use crate::ledger::state::SCHEMA_VERSION;
use crate::ledger::LedgerState;
use crate::serialization::SerializationError;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Snapshot store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("snapshot '{path}' is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        source: SerializationError,
    },

    #[error("snapshot '{path}' has schema version {found}, newest supported is {supported}")]
    UnsupportedSchema {
        path: PathBuf,
        found: u32,
        supported: u32,
    },

    #[error("failed to encode snapshot: {0}")]
    Encode(#[from] SerializationError),
}

/// File-backed ledger snapshot.
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load the snapshot, `None` if no snapshot has been written yet.
    pub fn load(&self) -> Result<Option<LedgerState>, StoreError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let state = LedgerState::from_bytes(&bytes).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })?;

        if state.schema_version > SCHEMA_VERSION {
            return Err(StoreError::UnsupportedSchema {
                path: self.path.clone(),
                found: state.schema_version,
                supported: SCHEMA_VERSION,
            });
        }

        Ok(Some(state))
    }

    /// Write `state` as the new snapshot.
    pub fn save(&self, state: &LedgerState) -> Result<(), StoreError> {
        let bytes = state.to_bytes()?;
        let io_err = |path: &Path| {
            let path = path.to_path_buf();
            move |source| StoreError::Io { path, source }
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(io_err(parent))?;
            }
        }

        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, &bytes).map_err(io_err(&tmp))?;
        fs::rename(&tmp, &self.path).map_err(io_err(&self.path))?;

        tracing::debug!(path = %self.path.display(), bytes = bytes.len(), "snapshot written");
        Ok(())
    }
}
