//! Ledger configuration file handling
//!
//! Configuration files are TOML. Every section is optional and falls back to
//! defaults, so an empty file is a valid configuration.
//!
//! ```toml
//! [runtime]
//! review_weight_offset = 1
//!
//! [genesis]
//! commitment = "<64 hex chars>"
//!
//! [[genesis.reputations]]
//! tag = "<64 hex chars>"
//! reputation = 5
//!
//! [storage]
//! state_path = "/var/lib/zkpeer/state.cbor"
//!
//! [logging]
//! level = "info"
//! ```

use crate::runtime::{Genesis, RuntimeConfig};
use crate::types::{CommitmentRoot, HashParseError, IdentityTag};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default log level
const DEFAULT_LOG_LEVEL: &str = "info";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    Parse { path: PathBuf, message: String },

    #[error("failed to write config file '{path}': {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to serialize config: {0}")]
    Serialize(String),

    #[error("invalid hash in '{field}': {source}")]
    InvalidHash {
        field: String,
        source: HashParseError,
    },

    #[error("failed to initialize logging: {0}")]
    Logging(String),
}

/// Top-level ledger configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ZkPeerConfig {
    #[serde(default)]
    pub runtime: RuntimeConfig,

    #[serde(default)]
    pub genesis: GenesisConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Genesis section, hashes as hex strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisConfig {
    /// Initial membership commitment root.
    pub commitment: Option<String>,

    /// Initial reputation allocations.
    #[serde(default)]
    pub reputations: Vec<ReputationAllocation>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReputationAllocation {
    pub tag: String,
    pub reputation: u64,
}

/// Snapshot storage configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Ledger snapshot path (in-memory only if not specified)
    pub state_path: Option<PathBuf>,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level or filter directive (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log file path (optional, logs to stderr if not specified)
    pub file: Option<PathBuf>,
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            file: None,
        }
    }
}

impl ZkPeerConfig {
    /// Parse configuration from TOML text.
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse {
            path: PathBuf::from("<inline>"),
            message: e.to_string(),
        })
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Save configuration to a TOML file
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let contents =
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?;

        let write_err = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        fs::write(path, contents).map_err(write_err)
    }

    /// Resolve the genesis section into typed values.
    pub fn to_genesis(&self) -> Result<Genesis, ConfigError> {
        let commitment = self
            .genesis
            .commitment
            .as_deref()
            .map(|hex| {
                CommitmentRoot::from_hex(hex).map_err(|source| ConfigError::InvalidHash {
                    field: "genesis.commitment".to_string(),
                    source,
                })
            })
            .transpose()?;

        let reputations = self
            .genesis
            .reputations
            .iter()
            .enumerate()
            .map(|(i, alloc)| {
                IdentityTag::from_hex(&alloc.tag)
                    .map(|tag| (tag, alloc.reputation))
                    .map_err(|source| ConfigError::InvalidHash {
                        field: format!("genesis.reputations[{}].tag", i),
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Genesis {
            commitment,
            reputations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = ZkPeerConfig::from_toml("").unwrap();
        assert_eq!(config.runtime.review_weight_offset, 1);
        assert_eq!(config.logging.level, "info");
        assert!(config.storage.state_path.is_none());
        assert_eq!(config.to_genesis().unwrap(), Genesis::default());
    }

    #[test]
    fn test_genesis_parsing() {
        let root = "01".repeat(32);
        let tag = "0b".repeat(32);
        let toml = format!(
            r#"
[runtime]
review_weight_offset = 2

[genesis]
commitment = "{root}"

[[genesis.reputations]]
tag = "{tag}"
reputation = 5
"#
        );

        let config = ZkPeerConfig::from_toml(&toml).unwrap();
        let genesis = config.to_genesis().unwrap();

        assert_eq!(config.runtime.review_weight_offset, 2);
        assert_eq!(genesis.commitment, Some(CommitmentRoot::from_bytes([1; 32])));
        assert_eq!(
            genesis.reputations,
            vec![(IdentityTag::from_bytes([0x0b; 32]), 5)]
        );
    }

    #[test]
    fn test_invalid_genesis_tag() {
        let toml = r#"
[[genesis.reputations]]
tag = "not-hex"
reputation = 1
"#;
        let config = ZkPeerConfig::from_toml(toml).unwrap();
        let err = config.to_genesis().unwrap_err();
        assert!(err.to_string().contains("genesis.reputations[0].tag"));
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(
            ZkPeerConfig::from_toml("[runtime\n"),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = ZkPeerConfig::default();
        config.genesis.commitment = Some("aa".repeat(32));
        config.storage.state_path = Some(dir.path().join("state.cbor"));
        config.logging.level = "debug".to_string();

        config.save(&path).unwrap();
        let loaded = ZkPeerConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = ZkPeerConfig::load(&dir.path().join("missing.toml"));
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }
}
