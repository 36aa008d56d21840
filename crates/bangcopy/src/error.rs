//! Error types for the bangcopy library.
//!
//! Everything in here is a fatal precondition: it is raised before any
//! copy is attempted and maps to exit status 2 at the CLI boundary.
//! Per-copy failures are not errors at this level; they are recorded as
//! [`crate::OperationStatus::Error`] results and the run carries on.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, BangError>;

/// Top-level error type for the library.
#[derive(Error, Debug)]
pub enum BangError {
    /// Configuration loading or validation failed.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The source folder does not exist or is not a directory.
    #[error("Source folder does not exist or is not a directory: {}", .0.display())]
    InvalidSource(PathBuf),

    /// The source folder name is not valid UTF-8.
    #[error("Source folder name is not valid UTF-8: {}", .0.display())]
    SourceName(PathBuf),

    /// The source folder could not be listed.
    #[error("Failed to read source folder {}: {source}", path.display())]
    Scan {
        /// Folder that was being listed.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The mark pattern failed to compile.
    #[error("Failed to compile file name pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// The log directory could not be created.
    #[error("Failed to create log directory {}: {source}", path.display())]
    LogDir {
        /// Log directory path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Errors raised while loading, validating, or saving the config file.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No config file at the given path.
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The config file exists but could not be read.
    #[error("Failed to read config file {}: {source}", path.display())]
    Read {
        /// Config file path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The config file is not valid JSON or has the wrong shape.
    #[error("Invalid JSON in config file {}: {source}", path.display())]
    Parse {
        /// Config file path.
        path: PathBuf,
        /// Underlying parse error.
        source: serde_json::Error,
    },

    /// The config file could not be written.
    #[error("Failed to write config file {}: {source}", path.display())]
    Write {
        /// Config file path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The `destinations` key is absent.
    #[error("Config missing 'destinations' key")]
    MissingDestinations,

    /// The `destinations` list is empty.
    #[error("'destinations' list is empty")]
    EmptyDestinations,

    /// A destination path does not exist.
    #[error("Destination folder does not exist: {}", .0.display())]
    DestinationMissing(PathBuf),

    /// A destination path exists but is not a directory.
    #[error("Destination is not a directory: {}", .0.display())]
    DestinationNotDirectory(PathBuf),

    /// `log_formats` is present but empty.
    #[error("'log_formats' list is empty")]
    EmptyLogFormats,

    /// The home directory could not be determined for `~` expansion.
    #[error("Failed to determine home directory")]
    NoHomeDirectory,
}
