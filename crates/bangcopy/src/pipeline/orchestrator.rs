//! Run orchestration - wires scan, match, plan, and execute together

use std::path::PathBuf;

use super::executor::{Execution, Executor};
use super::planner::Planner;
use crate::error::Result;
use crate::matcher::{MatchedFile, Matcher};
use crate::scanner;
use crate::source::SourceContext;

/// What a single run found and did
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// Eligible files in listing order
    pub matches: Vec<MatchedFile>,
    /// Results or preview, plus the summary
    pub execution: Execution,
}

/// Main triage engine
pub struct TriageEngine {
    matcher: Matcher,
    planner: Planner,
}

impl TriageEngine {
    /// Create an engine for validated destinations
    ///
    /// # Errors
    ///
    /// Returns an error if the matcher pattern fails to compile.
    pub fn new(destinations: Vec<PathBuf>) -> Result<Self> {
        Ok(Self {
            matcher: Matcher::new()?,
            planner: Planner::new(destinations),
        })
    }

    /// Scan the source folder once and pick out eligible files
    ///
    /// # Errors
    ///
    /// Returns an error if the source folder cannot be listed.
    pub fn find_matches(&self, source: &SourceContext) -> Result<Vec<MatchedFile>> {
        let entries = scanner::scan(source.source_path())?;
        let matches = self.matcher.match_entries(&entries);
        tracing::info!(
            found = matches.len(),
            source = %source.source_path().display(),
            "scan complete"
        );
        Ok(matches)
    }

    /// Run the whole pipeline for one source folder.
    ///
    /// Scanning is the last step that can fail; once a plan exists every
    /// copy failure is captured in the outcome instead.
    ///
    /// # Errors
    ///
    /// Returns an error if the source folder cannot be listed.
    pub fn run(&self, source: &SourceContext, executor: &Executor) -> Result<RunOutcome> {
        let matches = self.find_matches(source)?;
        if matches.is_empty() {
            return Ok(RunOutcome {
                matches,
                execution: Execution::default(),
            });
        }

        let plan = self.planner.plan(source, &matches);
        tracing::debug!(operations = plan.len(), dry_run = executor.is_dry_run(), "plan ready");

        let execution = executor.execute(plan);
        Ok(RunOutcome { matches, execution })
    }
}
