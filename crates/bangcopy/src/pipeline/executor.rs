//! Plan execution with per-operation failure isolation

use std::collections::HashSet;

use chrono::Local;

use super::actions::{PlanAction, PlannedOperation, PreviewLine};
use super::copier::{FileCopier, platform_copier};
use super::{OperationResult, OperationStatus, RunSummary};

/// Everything the executor produced for one run
#[derive(Debug, Clone, Default)]
pub struct Execution {
    /// One entry per planned operation in plan order; empty for a dry run
    pub results: Vec<OperationResult>,
    /// One entry per planned operation in plan order; empty for a real run
    pub preview: Vec<PreviewLine>,
    /// Counts folded from the results
    pub summary: RunSummary,
}

/// Performs or simulates a plan
pub struct Executor {
    dry_run: bool,
    copier: Box<dyn FileCopier>,
}

impl Executor {
    /// Create an executor using the platform copier
    #[must_use]
    pub fn new(dry_run: bool) -> Self {
        Self::with_copier(dry_run, platform_copier())
    }

    /// Create an executor with a specific copy strategy
    #[must_use]
    pub fn with_copier(dry_run: bool, copier: Box<dyn FileCopier>) -> Self {
        Self { dry_run, copier }
    }

    /// Whether this executor only previews
    #[must_use]
    pub const fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Execute the plan in order.
    ///
    /// A dry run produces preview lines and performs no writes. A real run
    /// copies or skips each operation; a failed copy is recorded as
    /// [`OperationStatus::Error`] and the next operation still runs.
    #[must_use]
    pub fn execute(&self, plan: Vec<PlannedOperation>) -> Execution {
        let matched_count = count_distinct_files(&plan);

        if self.dry_run {
            let preview: Vec<PreviewLine> = plan.iter().map(PreviewLine::from).collect();
            for line in &preview {
                tracing::debug!(
                    src = %line.source_path.display(),
                    dest = %line.destination_path.display(),
                    action = %line.action,
                    "dry run"
                );
            }
            return Execution {
                results: Vec::new(),
                preview,
                summary: RunSummary {
                    matched_count,
                    ..RunSummary::default()
                },
            };
        }

        let results: Vec<OperationResult> = plan.into_iter().map(|op| self.apply(op)).collect();
        let summary = RunSummary::from_results(matched_count, &results);

        tracing::info!(
            copied = summary.copied_count,
            skipped = summary.skipped_count,
            errors = summary.error_count,
            "plan executed"
        );

        Execution {
            results,
            preview: Vec::new(),
            summary,
        }
    }

    fn apply(&self, operation: PlannedOperation) -> OperationResult {
        let (status, error_message) = match operation.action() {
            PlanAction::SkipExists => {
                tracing::debug!(dest = %operation.destination_path().display(), "already exists");
                (OperationStatus::SkippedAlreadyExists, None)
            }
            PlanAction::Copy => match self
                .copier
                .copy(operation.source_path(), operation.destination_path())
            {
                Ok(()) => {
                    tracing::debug!(
                        src = %operation.source_path().display(),
                        dest = %operation.destination_path().display(),
                        "copied"
                    );
                    (OperationStatus::Success, None)
                }
                Err(e) => {
                    let message = format!(
                        "Failed to copy {} to {}: {e}",
                        operation.source_path().display(),
                        operation.destination_path().display()
                    );
                    tracing::warn!("{message}");
                    (OperationStatus::Error, Some(message))
                }
            },
        };

        OperationResult {
            operation,
            status,
            error_message,
            completed_at: Local::now(),
        }
    }
}

fn count_distinct_files(plan: &[PlannedOperation]) -> usize {
    plan.iter()
        .map(PlannedOperation::source_path)
        .collect::<HashSet<_>>()
        .len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::Matcher;
    use crate::pipeline::{MetadataCopier, Planner};
    use crate::source::SourceContext;
    use std::fs;
    use std::io;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    /// Fails every copy whose destination lives under `blocked`
    struct BlockingCopier {
        blocked: PathBuf,
    }

    impl FileCopier for BlockingCopier {
        fn copy(&self, source: &Path, dest: &Path) -> io::Result<()> {
            if dest.starts_with(&self.blocked) {
                return Err(io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"));
            }
            MetadataCopier.copy(source, dest)
        }
    }

    fn setup(names: &[&str]) -> (TempDir, SourceContext, Vec<PathBuf>) {
        let tmp = TempDir::new().unwrap();
        let shoot = tmp.path().join("shoot1");
        fs::create_dir(&shoot).unwrap();
        for name in names {
            fs::write(shoot.join(name), format!("content of {name}")).unwrap();
        }
        let dests = vec![tmp.path().join("d1"), tmp.path().join("d2")];
        for d in &dests {
            fs::create_dir(d).unwrap();
        }
        let source = SourceContext::from_dir(shoot).unwrap();
        (tmp, source, dests)
    }

    fn plan_for(
        source: &SourceContext,
        dests: &[PathBuf],
        names: &[&str],
    ) -> Vec<PlannedOperation> {
        let matcher = Matcher::new().unwrap();
        let matches: Vec<_> = names.iter().filter_map(|n| matcher.match_name(n)).collect();
        Planner::new(dests.to_vec()).plan(source, &matches)
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let names = ["!a.txt", "!!b.txt"];
        let (_tmp, source, dests) = setup(&names);
        let plan = plan_for(&source, &dests, &names);

        let execution = Executor::new(true).execute(plan);

        assert!(execution.results.is_empty());
        assert_eq!(execution.preview.len(), 4);
        assert_eq!(execution.summary.matched_count, 2);
        assert_eq!(execution.summary.copied_count, 0);
        for d in &dests {
            assert_eq!(fs::read_dir(d).unwrap().count(), 0);
        }
    }

    #[test]
    fn test_real_run_copies_in_plan_order() {
        let names = ["!a.txt", "!!b.txt"];
        let (_tmp, source, dests) = setup(&names);
        let plan = plan_for(&source, &dests, &names);
        let expected: Vec<_> = plan.iter().map(|op| op.destination_path().to_path_buf()).collect();

        let execution = Executor::with_copier(false, Box::new(MetadataCopier)).execute(plan);

        let got: Vec<_> = execution
            .results
            .iter()
            .map(|r| r.operation.destination_path().to_path_buf())
            .collect();
        assert_eq!(got, expected);
        assert!(execution.results.iter().all(|r| r.status == OperationStatus::Success));
        assert_eq!(
            fs::read_to_string(dests[1].join("shoot1 b.txt")).unwrap(),
            "content of !!b.txt"
        );
        assert_eq!(execution.summary.exit_status(), crate::ExitStatus::Success);
    }

    #[test]
    fn test_one_blocked_destination_does_not_stop_the_run() {
        let names = ["!a.txt", "!!b.txt", "!!!c.txt"];
        let (_tmp, source, dests) = setup(&names);
        fs::write(dests[0].join("shoot1 b.txt"), "keep").unwrap();
        let plan = plan_for(&source, &dests, &names);

        let copier = BlockingCopier {
            blocked: dests[1].clone(),
        };
        let execution = Executor::with_copier(false, Box::new(copier)).execute(plan);
        let summary = &execution.summary;

        assert_eq!(execution.results.len(), 6);
        assert_eq!(summary.matched_count, 3);
        assert_eq!(summary.copied_count, 2);
        assert_eq!(summary.skipped_count, 1);
        assert_eq!(summary.error_count, 3);
        assert_eq!(summary.exit_status(), crate::ExitStatus::PartialFailure);

        let errors: Vec<_> = execution
            .results
            .iter()
            .filter(|r| r.status == OperationStatus::Error)
            .collect();
        assert!(errors.iter().all(|r| r.operation.destination_dir() == dests[1]));
        assert!(errors.iter().all(|r| {
            r.error_message
                .as_deref()
                .is_some_and(|m| m.contains("permission denied"))
        }));

        assert!(dests[0].join("shoot1 a.txt").exists());
        assert!(dests[0].join("shoot1 c.txt").exists());
        assert_eq!(fs::read_to_string(dests[0].join("shoot1 b.txt")).unwrap(), "keep");
    }

    #[test]
    fn test_vanished_source_is_recorded_as_error() {
        let names = ["!a.txt", "!!b.txt"];
        let (_tmp, source, dests) = setup(&names);
        let plan = plan_for(&source, &dests, &names);
        fs::remove_file(source.source_path().join("!a.txt")).unwrap();

        let execution = Executor::with_copier(false, Box::new(MetadataCopier)).execute(plan);

        assert_eq!(execution.summary.error_count, 2);
        assert_eq!(execution.summary.copied_count, 2);
        assert_eq!(execution.results[0].status, OperationStatus::Error);
        assert_eq!(execution.results[2].status, OperationStatus::Success);
    }

    #[test]
    fn test_empty_plan_is_success() {
        let execution = Executor::new(false).execute(Vec::new());
        assert!(execution.results.is_empty());
        assert_eq!(execution.summary, RunSummary::default());
        assert_eq!(execution.summary.exit_status(), crate::ExitStatus::Success);
    }
}
