//! Source folder resolution

use std::path::{Path, PathBuf};

use crate::error::{BangError, Result};
use crate::matcher::MatchedFile;
use crate::paths;

/// The folder being triaged, resolved once per run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceContext {
    source_path: PathBuf,
    folder_name: String,
}

impl SourceContext {
    /// Resolve a user-supplied source path.
    ///
    /// `~` is expanded and the path is made absolute and canonical so that
    /// `.` yields the real folder name.
    ///
    /// # Errors
    ///
    /// Returns [`BangError::InvalidSource`] if the path does not exist, is
    /// not a directory, or has no final component to use as a folder name,
    /// and [`BangError::SourceName`] if that name is not valid UTF-8.
    pub fn resolve(path: &Path) -> Result<Self> {
        let source_path = paths::resolve(path);
        if !source_path.is_dir() {
            return Err(BangError::InvalidSource(source_path));
        }
        Self::from_dir(source_path)
    }

    /// Build a context from an already absolute directory path.
    ///
    /// # Errors
    ///
    /// Returns [`BangError::InvalidSource`] if the path has no final
    /// component, such as the filesystem root, and
    /// [`BangError::SourceName`] if that component is not valid UTF-8.
    pub fn from_dir(source_path: PathBuf) -> Result<Self> {
        let Some(name) = source_path.file_name() else {
            return Err(BangError::InvalidSource(source_path));
        };
        let Some(folder_name) = name.to_str().map(str::to_owned) else {
            return Err(BangError::SourceName(source_path));
        };

        Ok(Self {
            source_path,
            folder_name,
        })
    }

    /// Absolute path of the source folder
    #[must_use]
    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    /// Final component of the source path
    #[must_use]
    pub fn folder_name(&self) -> &str {
        &self.folder_name
    }

    /// On-disk location of a matched file
    #[must_use]
    pub fn file_path(&self, matched: &MatchedFile) -> PathBuf {
        self.source_path.join(matched.original_name())
    }

    /// The name a matched file is given in every destination
    #[must_use]
    pub fn renamed_target(&self, matched: &MatchedFile) -> String {
        renamed_target(&self.folder_name, matched.clean_basename())
    }
}

/// `<folder name> <clean basename>`
#[must_use]
pub fn renamed_target(folder_name: &str, clean_basename: &str) -> String {
    format!("{folder_name} {clean_basename}")
}
