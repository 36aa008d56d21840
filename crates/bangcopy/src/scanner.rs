//! Top-level directory snapshot for the source folder
//!
//! The source folder is listed exactly once per run. Nothing below the top
//! level is visited, and later changes to the folder are not re-observed.

use std::ffi::OsString;
use std::fs;
use std::path::Path;

use crate::error::{BangError, Result};

/// One entry of the source folder listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntrySnapshot {
    /// File name as reported by the filesystem
    pub name: OsString,
    /// Whether the entry is a regular file (symlinks to files count)
    pub is_file: bool,
}

impl DirEntrySnapshot {
    /// Build a snapshot entry by hand
    #[must_use]
    pub fn new(name: impl Into<OsString>, is_file: bool) -> Self {
        Self {
            name: name.into(),
            is_file,
        }
    }
}

/// List the top level of `base`, preserving the order the filesystem
/// returns entries in.
///
/// # Errors
///
/// Returns [`BangError::Scan`] if the directory or one of its entries
/// cannot be read.
pub fn scan(base: &Path) -> Result<Vec<DirEntrySnapshot>> {
    let scan_err = |source| BangError::Scan {
        path: base.to_path_buf(),
        source,
    };

    let mut entries = Vec::new();
    for entry in fs::read_dir(base).map_err(scan_err)? {
        let entry = entry.map_err(scan_err)?;
        let path = entry.path();

        entries.push(DirEntrySnapshot {
            name: entry.file_name(),
            is_file: path.is_file(),
        });
    }

    tracing::debug!(count = entries.len(), path = %base.display(), "scanned source folder");
    Ok(entries)
}
