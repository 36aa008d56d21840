//! Destination list management in the persisted config file
//!
//! These operations edit the file directly and keep every other key as is.

use std::path::{Path, PathBuf};

use super::loader::ConfigLoader;
use super::validation::ConfigValidator;
use crate::error::ConfigError;
use crate::paths;

/// Edits the `destinations` list of a config file
pub struct DestinationManager<'a> {
    config_path: &'a Path,
}

impl<'a> DestinationManager<'a> {
    /// Manage destinations stored in `config_path`
    #[must_use]
    pub const fn new(config_path: &'a Path) -> Self {
        Self { config_path }
    }

    /// Configured destinations as written in the file.
    ///
    /// A missing config file yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file cannot be read or parsed.
    pub fn list(&self) -> Result<Vec<PathBuf>, ConfigError> {
        let config = ConfigLoader::load_or_default(self.config_path)?;
        Ok(config.destinations.unwrap_or_default())
    }

    /// Add a destination. Returns the resolved path and whether it was
    /// newly added (`false` means it was already present).
    ///
    /// # Errors
    ///
    /// Returns an error if the path is not an existing directory or the
    /// config cannot be read or written.
    pub fn add(&self, dest: &Path) -> Result<(PathBuf, bool), ConfigError> {
        let resolved = ConfigValidator::validate_destination(dest)?;

        let mut config = ConfigLoader::load_or_default(self.config_path)?;
        let destinations = config.destinations.get_or_insert_with(Vec::new);

        if destinations.iter().any(|d| paths::resolve(d) == resolved) {
            tracing::debug!(dest = %resolved.display(), "destination already configured");
            return Ok((resolved, false));
        }

        destinations.push(resolved.clone());
        ConfigLoader::save(self.config_path, &config)?;
        tracing::info!(dest = %resolved.display(), "destination added");
        Ok((resolved, true))
    }

    /// Remove every entry that resolves to `dest`. Returns the resolved
    /// path and whether anything was removed.
    ///
    /// A missing config file is left alone.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be read or written.
    pub fn remove(&self, dest: &Path) -> Result<(PathBuf, bool), ConfigError> {
        let resolved = paths::resolve(dest);
        if !self.config_path.exists() {
            return Ok((resolved, false));
        }

        let mut config = ConfigLoader::load(self.config_path)?;
        let before = config.destinations.as_ref().map_or(0, Vec::len);
        if let Some(destinations) = config.destinations.as_mut() {
            destinations.retain(|d| paths::resolve(d) != resolved);
        }
        let removed = config.destinations.as_ref().map_or(0, Vec::len) != before;

        if removed {
            ConfigLoader::save(self.config_path, &config)?;
            tracing::info!(dest = %resolved.display(), "destination removed");
        }
        Ok((resolved, removed))
    }

    /// Remove all destinations
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be read or written.
    pub fn clear(&self) -> Result<(), ConfigError> {
        let mut config = ConfigLoader::load_or_default(self.config_path)?;
        config.destinations = Some(Vec::new());
        ConfigLoader::save(self.config_path, &config)?;
        tracing::info!(config = %self.config_path.display(), "destinations cleared");
        Ok(())
    }
}
