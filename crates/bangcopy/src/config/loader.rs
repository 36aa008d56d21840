//! Reading and writing the JSON config file

use std::fs;
use std::path::{Path, PathBuf};

use super::types::Config;
use crate::error::ConfigError;

/// Default config location: `~/.config/bang-copier/config.json`
///
/// # Errors
///
/// Returns [`ConfigError::NoHomeDirectory`] if the home directory is unknown.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    let home = dirs::home_dir().ok_or(ConfigError::NoHomeDirectory)?;
    Ok(home.join(".config").join("bang-copier").join("config.json"))
}

/// Config file reader and writer
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load the config file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist, cannot be read, or is
    /// not a valid config document.
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load the config file, or an empty config if it does not exist yet.
    ///
    /// Nothing is written when the file is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file cannot be read or parsed.
    pub fn load_or_default(path: &Path) -> Result<Config, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Config::default())
        }
    }

    /// Write `config` to `path` as pretty JSON, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Write`] if the directory or file cannot be written.
    pub fn save(path: &Path, config: &Config) -> Result<(), ConfigError> {
        let write_err = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }

        let mut content = serde_json::to_string_pretty(config)
            .map_err(|e| write_err(std::io::Error::other(e)))?;
        content.push('\n');
        fs::write(path, content).map_err(write_err)?;

        tracing::debug!(config = %path.display(), "config saved");
        Ok(())
    }
}
