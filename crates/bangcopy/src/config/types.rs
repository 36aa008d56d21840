//! Configuration types and structures

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Run log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human readable, pipe separated lines
    Log,
    /// Comma separated values
    Csv,
    /// A single JSON document
    Json,
}

impl LogFormat {
    /// File extension for artifacts of this format
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Log => "log",
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

/// Config file contents as stored on disk.
///
/// Keys are optional here; [`super::ConfigValidator`] decides what is
/// required. Unknown keys are kept in `extra` so rewriting the file does
/// not drop them.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Config {
    /// Destination folders, copied into in this order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destinations: Option<Vec<PathBuf>>,

    /// Where run logs are written
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<PathBuf>,

    /// Which run log formats to write
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_formats: Option<Vec<LogFormat>>,

    /// Keys this version does not know about
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
