//! TOML bridge configuration.

use crate::forwarding::domain::{ChannelConfig, ForwardingDomainError, GameChannelName};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors returned while loading bridge configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// File that failed to load.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The document is not valid TOML for this schema.
    #[error("invalid bridge configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// A section name is not a valid game channel name.
    #[error("invalid game channel '{name}': {source}")]
    Domain {
        /// Offending section name.
        name: String,
        /// Validation failure.
        source: ForwardingDomainError,
    },
}

/// Top-level bridge configuration document.
///
/// Each `[channels.<name>]` table configures one game channel.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BridgeConfig {
    #[serde(default)]
    channels: BTreeMap<String, ChannelConfig>,
}

impl BridgeConfig {
    /// Parses a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed documents.
    pub fn from_toml_str(document: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(document)?)
    }

    /// Reads and parses a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] when the file cannot be read and
    /// [`ConfigError::Parse`] when it is malformed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let file = path.as_ref();
        let document = std::fs::read_to_string(file).map_err(|source| ConfigError::Read {
            path: file.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&document)?;
        tracing::debug!(
            path = %file.display(),
            channels = config.channels.len(),
            "loaded bridge configuration"
        );
        Ok(config)
    }

    /// Returns the number of configured game channels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    /// Returns whether no game channel is configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Validates section names and returns one config per game channel.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Domain`] for an invalid game channel name.
    pub fn into_channel_configs(self) -> Result<Vec<ChannelConfig>, ConfigError> {
        self.channels
            .into_iter()
            .map(|(name, config)| {
                let game_channel = GameChannelName::new(name.as_str())
                    .map_err(|source| ConfigError::Domain { name, source })?;
                Ok(config.named(game_channel))
            })
            .collect()
    }
}
