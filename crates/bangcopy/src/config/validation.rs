//! Configuration validation
//!
//! Every failure here is fatal for the run. Destinations are never created
//! on the user's behalf: a missing destination is an error.

use std::fs;
use std::path::{Path, PathBuf};

use super::types::{Config, LogFormat};
use crate::error::{BangError, ConfigError};
use crate::paths;

/// Name of the fallback log directory under the home directory
const DEFAULT_LOG_DIR: &str = "bang-copier-logs";

/// A config that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedConfig {
    destinations: Vec<PathBuf>,
    log_dir: Option<PathBuf>,
    log_formats: Vec<LogFormat>,
}

impl ValidatedConfig {
    /// Resolved destination directories, non-empty and all existing at
    /// validation time
    #[must_use]
    pub fn destinations(&self) -> &[PathBuf] {
        &self.destinations
    }

    /// Resolved log directory, if configured
    #[must_use]
    pub fn log_dir(&self) -> Option<&Path> {
        self.log_dir.as_deref()
    }

    /// Enabled run log formats, never empty
    #[must_use]
    pub fn log_formats(&self) -> &[LogFormat] {
        &self.log_formats
    }

    /// Log directory to use, falling back to `~/bang-copier-logs`
    ///
    /// # Errors
    ///
    /// Returns an error if no directory is configured and the home
    /// directory cannot be determined.
    pub fn effective_log_dir(&self) -> Result<PathBuf, ConfigError> {
        match &self.log_dir {
            Some(dir) => Ok(dir.clone()),
            None => dirs::home_dir()
                .map(|home| home.join(DEFAULT_LOG_DIR))
                .ok_or(ConfigError::NoHomeDirectory),
        }
    }

    /// Resolve the log directory and create it if missing.
    ///
    /// Only real runs call this; a dry run leaves the filesystem untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be determined or created.
    pub fn ensure_log_dir(&self) -> Result<PathBuf, BangError> {
        let dir = self.effective_log_dir()?;
        fs::create_dir_all(&dir).map_err(|source| BangError::LogDir {
            path: dir.clone(),
            source,
        })?;
        Ok(dir)
    }
}

/// Configuration validator
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a configuration and resolve its paths.
    ///
    /// # Errors
    ///
    /// Returns an error if `destinations` is missing or empty, if any
    /// destination is missing or not a directory, or if `log_formats` is
    /// present but empty.
    pub fn validate(config: &Config) -> Result<ValidatedConfig, ConfigError> {
        let raw = config
            .destinations
            .as_ref()
            .ok_or(ConfigError::MissingDestinations)?;

        if raw.is_empty() {
            return Err(ConfigError::EmptyDestinations);
        }

        let resolved = raw
            .iter()
            .map(|dest| Self::validate_destination(dest))
            .collect::<Result<Vec<_>, _>>()?;
        let destinations = dedup_in_order(&resolved);

        let log_formats = match &config.log_formats {
            Some(formats) if formats.is_empty() => return Err(ConfigError::EmptyLogFormats),
            Some(formats) => dedup_in_order(formats),
            None => vec![LogFormat::Log],
        };

        let log_dir = config
            .log_dir
            .as_deref()
            .filter(|dir| !dir.as_os_str().is_empty())
            .map(paths::resolve);

        Ok(ValidatedConfig {
            destinations,
            log_dir,
            log_formats,
        })
    }

    /// Resolve one destination and require it to be an existing directory
    ///
    /// # Errors
    ///
    /// Returns an error if the path does not exist or is not a directory.
    pub fn validate_destination(dest: &Path) -> Result<PathBuf, ConfigError> {
        let resolved = paths::resolve(dest);
        if !resolved.exists() {
            return Err(ConfigError::DestinationMissing(resolved));
        }
        if !resolved.is_dir() {
            return Err(ConfigError::DestinationNotDirectory(resolved));
        }
        Ok(resolved)
    }
}

/// First occurrence of each item, in the original order
fn dedup_in_order<T: PartialEq + Clone>(items: &[T]) -> Vec<T> {
    let mut seen: Vec<T> = Vec::with_capacity(items.len());
    for item in items {
        if !seen.contains(item) {
            seen.push(item.clone());
        }
    }
    seen
}
