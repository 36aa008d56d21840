//! Matching, planning, and copy execution
//!
//! This module implements the core triage pipeline. The planner decides
//! copy or skip for every (file, destination) pair without writing
//! anything; the executor then performs or previews that plan. The same
//! plan drives both modes, so a dry run shows exactly what a real run
//! would attempt.

mod actions;
mod copier;
mod executor;
mod orchestrator;
mod planner;
mod reporting;

use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Local};
use serde::Serialize;

pub use actions::{PlanAction, PlannedOperation, PreviewLine};
pub use copier::{FileCopier, MetadataCopier, platform_copier};
pub use executor::{Execution, Executor};
pub use orchestrator::{RunOutcome, TriageEngine};
pub use planner::Planner;
pub use reporting::{Reporter, Style};

#[cfg(target_os = "macos")]
pub use copier::DittoCopier;

/// Final state of one executed operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperationStatus {
    /// The copy was written
    Success,
    /// The destination file already existed at plan time
    SkippedAlreadyExists,
    /// The copy failed; see the error message
    Error,
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => f.write_str("SUCCESS"),
            Self::SkippedAlreadyExists => f.write_str("SKIPPED_ALREADY_EXISTS"),
            Self::Error => f.write_str("ERROR"),
        }
    }
}

/// Result of one executed operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationResult {
    /// The operation that ran
    pub operation: PlannedOperation,
    /// How it ended
    pub status: OperationStatus,
    /// Set when `status` is [`OperationStatus::Error`]
    pub error_message: Option<String>,
    /// When the operation finished
    pub completed_at: DateTime<Local>,
}

/// Run statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Distinct eligible files (not files × destinations)
    pub matched_count: usize,
    /// Operations that ended in [`OperationStatus::Success`]
    pub copied_count: usize,
    /// Operations that ended in [`OperationStatus::SkippedAlreadyExists`]
    pub skipped_count: usize,
    /// Operations that ended in [`OperationStatus::Error`]
    pub error_count: usize,
    /// Primary log artifact, when one was written
    pub log_path: Option<PathBuf>,
}

impl RunSummary {
    /// Fold results into counts
    #[must_use]
    pub fn from_results(matched_count: usize, results: &[OperationResult]) -> Self {
        let count = |status| results.iter().filter(|r| r.status == status).count();
        Self {
            matched_count,
            copied_count: count(OperationStatus::Success),
            skipped_count: count(OperationStatus::SkippedAlreadyExists),
            error_count: count(OperationStatus::Error),
            log_path: None,
        }
    }

    /// Whether every operation succeeded or was skipped
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.error_count == 0
    }

    /// Exit status for a run that got past its preconditions
    #[must_use]
    pub const fn exit_status(&self) -> ExitStatus {
        if self.is_success() {
            ExitStatus::Success
        } else {
            ExitStatus::PartialFailure
        }
    }
}

/// Process exit status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    /// No copy failed, including runs with nothing to copy
    Success,
    /// At least one copy failed
    PartialFailure,
    /// Config, source, or destination check failed before planning
    FatalPrecondition,
}

impl ExitStatus {
    /// Numeric exit code
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Success => 0,
            Self::PartialFailure => 1,
            Self::FatalPrecondition => 2,
        }
    }
}

#[cfg(test)]
mod integration_tests {
    use std::fs;
    use std::path::{Path, PathBuf};

    use tempfile::TempDir;

    use super::*;
    use crate::source::SourceContext;

    struct Scenario {
        _tmp: TempDir,
        source: SourceContext,
        d1: PathBuf,
        d2: PathBuf,
    }

    fn create_test_file(dir: &Path, name: &str, content: &str) {
        fs::write(dir.join(name), content).unwrap();
    }

    fn shoot1() -> Scenario {
        let tmp = TempDir::new().unwrap();
        let shoot = tmp.path().join("shoot1");
        let d1 = tmp.path().join("d1");
        let d2 = tmp.path().join("d2");
        for dir in [&shoot, &d1, &d2] {
            fs::create_dir(dir).unwrap();
        }

        for name in ["!a.txt", "!!b.txt", "!!!c.txt", "!!!!d.txt", "normal.txt"] {
            create_test_file(&shoot, name, name);
        }

        Scenario {
            source: SourceContext::from_dir(shoot).unwrap(),
            _tmp: tmp,
            d1,
            d2,
        }
    }

    fn engine(sc: &Scenario) -> TriageEngine {
        TriageEngine::new(vec![sc.d1.clone(), sc.d2.clone()]).unwrap()
    }

    fn real_executor() -> Executor {
        Executor::with_copier(false, Box::new(MetadataCopier))
    }

    #[test]
    fn test_copies_three_files_to_two_destinations() {
        let sc = shoot1();

        let outcome = engine(&sc).run(&sc.source, &real_executor()).unwrap();
        let summary = &outcome.execution.summary;

        assert_eq!(outcome.matches.len(), 3);
        assert_eq!(outcome.execution.results.len(), 6);
        assert!(
            outcome
                .execution
                .results
                .iter()
                .all(|r| r.status == OperationStatus::Success)
        );
        assert_eq!(summary.matched_count, 3);
        assert_eq!(summary.copied_count, 6);
        assert_eq!(summary.error_count, 0);
        assert_eq!(summary.exit_status().code(), 0);

        for dest in [&sc.d1, &sc.d2] {
            for name in ["shoot1 a.txt", "shoot1 b.txt", "shoot1 c.txt"] {
                assert!(dest.join(name).exists(), "missing {name}");
            }
            assert!(!dest.join("shoot1 d.txt").exists());
            assert!(!dest.join("shoot1 !d.txt").exists());
            assert_eq!(fs::read_dir(dest).unwrap().count(), 3);
        }
        assert_eq!(
            fs::read_to_string(sc.d2.join("shoot1 c.txt")).unwrap(),
            "!!!c.txt"
        );
    }

    #[test]
    fn test_existing_file_in_one_destination_is_skipped() {
        let sc = shoot1();
        create_test_file(&sc.d1, "shoot1 a.txt", "original bytes");

        let outcome = engine(&sc).run(&sc.source, &real_executor()).unwrap();
        let summary = &outcome.execution.summary;

        assert_eq!(summary.copied_count, 5);
        assert_eq!(summary.skipped_count, 1);
        assert_eq!(summary.error_count, 0);
        assert_eq!(summary.exit_status(), ExitStatus::Success);
        assert_eq!(
            outcome.execution.results[0].status,
            OperationStatus::SkippedAlreadyExists
        );
        assert_eq!(
            fs::read_to_string(sc.d1.join("shoot1 a.txt")).unwrap(),
            "original bytes"
        );
    }

    #[test]
    fn test_dry_run_matches_real_plan() {
        let sc = shoot1();
        create_test_file(&sc.d2, "shoot1 b.txt", "x");
        let engine = engine(&sc);

        let dry = engine.run(&sc.source, &Executor::new(true)).unwrap();
        assert!(dry.execution.results.is_empty());
        assert_eq!(dry.execution.preview.len(), 6);
        assert_eq!(fs::read_dir(&sc.d1).unwrap().count(), 0);
        assert_eq!(fs::read_dir(&sc.d2).unwrap().count(), 1);

        let real = engine.run(&sc.source, &real_executor()).unwrap();
        let executed: Vec<_> = real
            .execution
            .results
            .iter()
            .map(|r| PreviewLine::from(&r.operation))
            .collect();
        assert_eq!(dry.execution.preview, executed);
    }

    #[test]
    fn test_second_run_skips_everything() {
        let sc = shoot1();
        let engine = engine(&sc);

        engine.run(&sc.source, &real_executor()).unwrap();
        let again = engine.run(&sc.source, &real_executor()).unwrap();

        assert_eq!(again.execution.summary.copied_count, 0);
        assert_eq!(again.execution.summary.skipped_count, 6);
        assert_eq!(again.execution.summary.exit_status(), ExitStatus::Success);
    }

    #[test]
    fn test_colliding_clean_names_are_not_errors() {
        let sc = shoot1();
        // "!!a.txt" and "!a.txt" both become "shoot1 a.txt"
        create_test_file(sc.source.source_path(), "!!a.txt", "second a");

        let outcome = engine(&sc).run(&sc.source, &real_executor()).unwrap();
        let summary = &outcome.execution.summary;

        assert_eq!(summary.matched_count, 4);
        assert_eq!(summary.copied_count, 6);
        assert_eq!(summary.skipped_count, 2);
        assert_eq!(summary.error_count, 0);
        assert_eq!(summary.exit_status(), ExitStatus::Success);
        assert_eq!(fs::read_dir(&sc.d1).unwrap().count(), 3);
    }

    #[cfg(unix)]
    #[test]
    fn test_unwritable_target_name_is_isolated() {
        let sc = shoot1();
        // Fits in the source folder, too long once prefixed with "shoot1 "
        let long_name = format!("!{}.txt", "x".repeat(250));
        create_test_file(sc.source.source_path(), &long_name, "long");

        let outcome = engine(&sc).run(&sc.source, &real_executor()).unwrap();
        let summary = &outcome.execution.summary;

        assert_eq!(summary.matched_count, 4);
        assert_eq!(summary.copied_count, 6);
        assert_eq!(summary.error_count, 2);
        assert_eq!(summary.exit_status(), ExitStatus::PartialFailure);
        assert!(
            outcome
                .execution
                .results
                .iter()
                .filter(|r| r.status == OperationStatus::Error)
                .all(|r| r.error_message.is_some())
        );
    }

    #[test]
    fn test_no_eligible_files_is_success() {
        let tmp = TempDir::new().unwrap();
        let empty = tmp.path().join("empty");
        let d1 = tmp.path().join("d1");
        fs::create_dir(&empty).unwrap();
        fs::create_dir(&d1).unwrap();
        create_test_file(&empty, "normal.txt", "n");

        let source = SourceContext::from_dir(empty).unwrap();
        let outcome = TriageEngine::new(vec![d1])
            .unwrap()
            .run(&source, &real_executor())
            .unwrap();

        assert!(outcome.matches.is_empty());
        assert_eq!(outcome.execution.summary, RunSummary::default());
        assert_eq!(outcome.execution.summary.exit_status(), ExitStatus::Success);
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(ExitStatus::Success.code(), 0);
        assert_eq!(ExitStatus::PartialFailure.code(), 1);
        assert_eq!(ExitStatus::FatalPrecondition.code(), 2);
    }

    #[test]
    fn test_status_display_matches_log_vocabulary() {
        assert_eq!(OperationStatus::Success.to_string(), "SUCCESS");
        assert_eq!(
            OperationStatus::SkippedAlreadyExists.to_string(),
            "SKIPPED_ALREADY_EXISTS"
        );
        assert_eq!(OperationStatus::Error.to_string(), "ERROR");
        assert_eq!(
            serde_json::to_string(&OperationStatus::SkippedAlreadyExists).unwrap(),
            r#""SKIPPED_ALREADY_EXISTS""#
        );
    }
}
