//! Planned copy operations

use std::fmt;
use std::path::{Path, PathBuf};

use crate::matcher::MatchedFile;

/// What the executor will do for one (file, destination) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlanAction {
    /// Copy to a path that did not exist at plan time
    Copy,
    /// Leave an existing destination file alone
    SkipExists,
}

impl fmt::Display for PlanAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Copy => f.write_str("COPY"),
            Self::SkipExists => f.write_str("SKIP_EXISTS"),
        }
    }
}

/// One planned operation.
///
/// Built by the planner, consumed once by the executor, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedOperation {
    matched_file: MatchedFile,
    source_path: PathBuf,
    destination_dir: PathBuf,
    destination_path: PathBuf,
    action: PlanAction,
}

impl PlannedOperation {
    pub(crate) const fn new(
        matched_file: MatchedFile,
        source_path: PathBuf,
        destination_dir: PathBuf,
        destination_path: PathBuf,
        action: PlanAction,
    ) -> Self {
        Self {
            matched_file,
            source_path,
            destination_dir,
            destination_path,
            action,
        }
    }

    /// The matched file this operation copies
    #[must_use]
    pub const fn matched_file(&self) -> &MatchedFile {
        &self.matched_file
    }

    /// Where the matched file lives in the source folder
    #[must_use]
    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    /// Destination folder
    #[must_use]
    pub fn destination_dir(&self) -> &Path {
        &self.destination_dir
    }

    /// Full path of the renamed copy
    #[must_use]
    pub fn destination_path(&self) -> &Path {
        &self.destination_path
    }

    /// File name of the renamed copy
    #[must_use]
    pub fn renamed_name(&self) -> String {
        self.destination_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Copy or skip
    #[must_use]
    pub const fn action(&self) -> PlanAction {
        self.action
    }
}

/// A dry-run stand-in for an executed operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewLine {
    /// Source file
    pub source_path: PathBuf,
    /// Renamed destination file
    pub destination_path: PathBuf,
    /// What a real run would do
    pub action: PlanAction,
}

impl From<&PlannedOperation> for PreviewLine {
    fn from(op: &PlannedOperation) -> Self {
        Self {
            source_path: op.source_path.clone(),
            destination_path: op.destination_path.clone(),
            action: op.action,
        }
    }
}
