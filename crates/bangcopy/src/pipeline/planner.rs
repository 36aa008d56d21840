//! Plan construction: every matched file times every destination

use std::collections::HashSet;
use std::path::PathBuf;

use super::actions::{PlanAction, PlannedOperation};
use crate::matcher::MatchedFile;
use crate::source::SourceContext;

/// Turns matches into an ordered list of copy/skip operations
#[derive(Debug, Clone)]
pub struct Planner {
    destinations: Vec<PathBuf>,
}

impl Planner {
    /// Create a planner for validated destinations.
    ///
    /// Destinations must already exist; the planner never creates them.
    #[must_use]
    pub const fn new(destinations: Vec<PathBuf>) -> Self {
        Self { destinations }
    }

    /// Destinations in copy order
    #[must_use]
    pub fn destinations(&self) -> &[PathBuf] {
        &self.destinations
    }

    /// Build the plan.
    ///
    /// Files are taken in match order and, for each file, destinations in
    /// configured order. A destination path that already exists, or that an
    /// earlier operation in the same plan already claimed, becomes
    /// [`PlanAction::SkipExists`]. The existence check is advisory: another
    /// process may create the file before the executor gets to it.
    #[must_use]
    pub fn plan(&self, source: &SourceContext, matches: &[MatchedFile]) -> Vec<PlannedOperation> {
        let mut plan = Vec::with_capacity(matches.len() * self.destinations.len());
        let mut claimed = HashSet::with_capacity(plan.capacity());

        for matched in matches {
            let source_path = source.file_path(matched);
            let renamed = source.renamed_target(matched);

            for dest_dir in &self.destinations {
                let destination_path = dest_dir.join(&renamed);
                let already_claimed = !claimed.insert(destination_path.clone());
                let action = if already_claimed || destination_path.exists() {
                    PlanAction::SkipExists
                } else {
                    PlanAction::Copy
                };

                tracing::debug!(
                    src = %source_path.display(),
                    dest = %destination_path.display(),
                    %action,
                    "planned"
                );

                plan.push(PlannedOperation::new(
                    matched.clone(),
                    source_path.clone(),
                    dest_dir.clone(),
                    destination_path,
                    action,
                ));
            }
        }

        plan
    }
}
