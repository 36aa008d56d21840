//! Configuration file loading, validation, and destination management
//!
//! This module handles:
//! - Default config location (`~/.config/bang-copier/config.json`)
//! - JSON parsing with serde
//! - Validation of destinations and log formats (fatal on failure)
//! - Log directory resolution
//! - Adding, removing, and clearing destinations in the persisted file

mod destinations;
mod loader;
mod types;
mod validation;


use std::path::Path;

pub use destinations::DestinationManager;
pub use loader::{ConfigLoader, default_config_path};
pub use types::{Config, LogFormat};
pub use validation::{ConfigValidator, ValidatedConfig};

use crate::error::ConfigError;

/// Coordinates loading and validation for a normal run
pub struct ConfigManager;

impl ConfigManager {
    /// Load the config file and validate it.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, unreadable, not valid JSON,
    /// or fails validation.
    pub fn load(path: &Path) -> Result<ValidatedConfig, ConfigError> {
        let config = ConfigLoader::load(path)?;
        let validated = ConfigValidator::validate(&config)?;

        tracing::debug!(
            config = %path.display(),
            destinations = validated.destinations().len(),
            "config loaded and validated"
        );
        Ok(validated)
    }
}
