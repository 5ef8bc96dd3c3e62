//! Locates and reads the bridge's TOML settings.
//!
//! Lookup order is `./.cli-bridge.toml`, then
//! `<config_dir>/cli-bridge/config.toml`. When neither exists the built-in
//! defaults apply, so running without any config file is normal.

use std::path::{Path, PathBuf};

use super::BridgeConfig;

/// Per-project settings file, resolved against the working directory.
pub const LOCAL_CONFIG_FILE: &str = ".cli-bridge.toml";

/// Resolves which settings file a run uses. `--config` replaces the whole
/// lookup with a single path.
#[derive(Debug)]
pub struct ConfigLoader {
    /// Candidate files; the first one present is used.
    search_paths: Vec<PathBuf>,
}

impl ConfigLoader {
    /// Look in the working directory first, then the per-user config dir.
    #[must_use]
    pub fn new() -> Self {
        let mut search_paths = vec![PathBuf::from(LOCAL_CONFIG_FILE)];

        if let Some(config_dir) = dirs::config_dir() {
            search_paths.push(config_dir.join("cli-bridge").join("config.toml"));
        }

        Self { search_paths }
    }

    /// Use exactly `path`; defaults apply if it does not exist.
    #[must_use]
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            search_paths: vec![path],
        }
    }

    /// Read the first candidate that exists, falling back to
    /// [`BridgeConfig::default`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the chosen file cannot be read or is not a
    /// valid bridge config. A missing file is not an error.
    pub fn load(&self) -> Result<BridgeConfig, ConfigError> {
        match self.find_config_file() {
            Some(path) => {
                tracing::debug!(path = %path.display(), "Loading config file");
                Self::load_from_path(&path)
            }
            None => {
                tracing::debug!("No config file found, using defaults");
                Ok(BridgeConfig::default())
            }
        }
    }

    fn load_from_path(path: &Path) -> Result<BridgeConfig, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Candidate files in lookup order.
    #[must_use]
    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }

    /// The file `load` would read, if any.
    #[must_use]
    pub fn find_config_file(&self) -> Option<PathBuf> {
        self.search_paths.iter().find(|p| p.exists()).cloned()
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// A settings file was found but could not be used.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
}
