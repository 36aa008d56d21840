//! Console rendering of matches, previews, results, and summaries
//!
//! Everything here returns a `String`; printing is left to the caller.
//! Styling is passed in as a [`Style`] value rather than detected globally.

use std::fmt::Write;
use std::path::{Path, PathBuf};

use super::actions::{PlanAction, PreviewLine};
use super::{OperationResult, OperationStatus, RunSummary};
use crate::matcher::MatchedFile;
use crate::source::SourceContext;

/// Output styling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Style {
    /// No escape codes
    #[default]
    Plain,
    /// ANSI colors and bold headings
    Color,
}

/// Console reporter
#[derive(Debug, Clone, Copy, Default)]
pub struct Reporter {
    style: Style,
}

impl Reporter {
    /// Create a reporter with the given styling
    #[must_use]
    pub const fn new(style: Style) -> Self {
        Self { style }
    }

    fn paint(self, code: &str, text: &str) -> String {
        match self.style {
            Style::Plain => text.to_string(),
            Style::Color => format!("\x1b[{code}m{text}\x1b[0m"),
        }
    }

    /// Banner shown at startup
    #[must_use]
    pub fn intro(self) -> String {
        let title = self.paint("1;36", "Bang File Copier");
        format!("=== {title} ===\nCopy '!' files into your destinations.\n")
    }

    /// Resolved inputs for this run
    #[must_use]
    pub fn run_header(
        self,
        source: &SourceContext,
        destinations: &[PathBuf],
        log_dir: Option<&Path>,
        dry_run: bool,
    ) -> String {
        let mut output = String::new();
        let _ = writeln!(output, "{} Config loaded and validated", self.paint("32", "✓"));
        let _ = writeln!(output, "  Source:       {}", source.source_path().display());
        let _ = writeln!(output, "  Destinations:");
        for dest in destinations {
            let _ = writeln!(output, "    - {}", dest.display());
        }
        if let Some(dir) = log_dir {
            let _ = writeln!(output, "  Log directory: {}", dir.display());
        }
        if dry_run {
            let _ = writeln!(output, "  Mode:         {}", self.paint("33", "dry run"));
        }
        output
    }

    /// Shown when the source folder has nothing to copy
    #[must_use]
    pub fn no_matches(self) -> String {
        self.paint("33", "No eligible '!' files found. Exiting.")
    }

    /// Eligible files and the names they will get
    #[must_use]
    pub fn matches(self, source: &SourceContext, matches: &[MatchedFile]) -> String {
        let mut output = String::new();
        let _ = writeln!(output, "Found {} eligible file(s):", matches.len());
        for matched in matches {
            let _ = writeln!(
                output,
                "  {} -> {}",
                matched.original_name(),
                self.paint("1", &source.renamed_target(matched))
            );
        }
        output
    }

    /// What a real run would do, one line per planned operation
    #[must_use]
    pub fn preview(self, lines: &[PreviewLine]) -> String {
        let mut output = String::new();
        let tag = self.paint("33", "[DRY RUN]");
        for line in lines {
            let _ = match line.action {
                PlanAction::Copy => writeln!(
                    output,
                    "{tag} Would copy: {} -> {}",
                    line.source_path.display(),
                    line.destination_path.display()
                ),
                PlanAction::SkipExists => writeln!(
                    output,
                    "{tag} Would skip (already exists): {}",
                    line.destination_path.display()
                ),
            };
        }
        output
    }

    /// Outcome of each executed operation
    #[must_use]
    pub fn results(self, results: &[OperationResult]) -> String {
        let mut output = String::new();
        for result in results {
            let dest = result.operation.destination_path().display();
            let _ = match result.status {
                OperationStatus::Success => {
                    writeln!(output, "  {} {dest}", self.paint("32", "✓"))
                }
                OperationStatus::SkippedAlreadyExists => {
                    writeln!(output, "  {} {dest} (already exists)", self.paint("33", "-"))
                }
                OperationStatus::Error => writeln!(
                    output,
                    "  {} {dest}: {}",
                    self.paint("31", "✗"),
                    result.error_message.as_deref().unwrap_or("unknown error")
                ),
            };
        }
        output
    }

    /// Generate a summary report.
    ///
    /// For a dry run, `preview` supplies the would-copy and would-skip counts.
    #[must_use]
    pub fn summary(self, summary: &RunSummary, dry_run: bool, preview: &[PreviewLine]) -> String {
        let mut output = String::new();

        output.push_str("\n=== Summary ===\n");
        let _ = writeln!(output, "Matched files: {}", summary.matched_count);

        if dry_run {
            let would_copy = preview.iter().filter(|l| l.action == PlanAction::Copy).count();
            let would_skip = preview.len() - would_copy;
            let _ = writeln!(output, "Would copy:    {would_copy}");
            let _ = writeln!(output, "Would skip:    {would_skip}");
            output.push_str("Dry run: no files copied, no log written\n");
            return output;
        }

        let _ = writeln!(output, "Copied:        {}", summary.copied_count);
        let _ = writeln!(output, "Skipped:       {}", summary.skipped_count);
        let _ = writeln!(output, "Errors:        {}", summary.error_count);

        if let Some(log_path) = &summary.log_path {
            let _ = writeln!(output, "Log:           {}", log_path.display());
        }

        if summary.is_success() {
            let _ = writeln!(output, "Status: {}", self.paint("32", "✓ Success"));
        } else {
            let _ = writeln!(output, "Status: {}", self.paint("31", "✗ Completed with errors"));
        }

        output
    }

    /// Configured destinations
    #[must_use]
    pub fn destinations(self, destinations: &[PathBuf]) -> String {
        if destinations.is_empty() {
            return "No destinations configured.\n".to_string();
        }
        let mut output = String::from("Configured destinations:\n");
        for (idx, dest) in destinations.iter().enumerate() {
            let _ = writeln!(output, "  {}. {}", idx + 1, dest.display());
        }
        output
    }

    /// Result of adding a destination
    #[must_use]
    pub fn destination_added(self, dest: &Path, added: bool) -> String {
        if added {
            format!("{} Added destination: {}", self.paint("32", "✓"), dest.display())
        } else {
            format!("Destination already configured: {}", dest.display())
        }
    }

    /// Result of removing a destination
    #[must_use]
    pub fn destination_removed(self, dest: &Path, removed: bool) -> String {
        if removed {
            format!("{} Removed destination: {}", self.paint("32", "✓"), dest.display())
        } else {
            format!("Destination not found in config: {}", dest.display())
        }
    }

    /// Result of clearing destinations
    #[must_use]
    pub fn destinations_cleared(self) -> String {
        format!("{} Cleared all destinations", self.paint("32", "✓"))
    }
}
