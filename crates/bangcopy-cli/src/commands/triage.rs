use std::path::Path;

use anyhow::Context;
use bangcopy::config::ConfigManager;
use bangcopy::pipeline::{Executor, Reporter, TriageEngine};
use bangcopy::run_log::{RunLogWriter, RunMetadata};
use bangcopy::{ExitStatus, SourceContext};

/// Default command: scan, plan, copy (or preview), log, summarize
pub struct Triage;

impl Triage {
    pub fn execute(
        source: &Path,
        config_path: &Path,
        dry_run: bool,
        reporter: Reporter,
    ) -> anyhow::Result<ExitStatus> {
        println!("{}", reporter.intro());

        // Every check that can stop the run happens before the first copy
        let source = SourceContext::resolve(source)?;
        let config = ConfigManager::load(config_path)?;
        let log_dir = if dry_run {
            config.effective_log_dir().ok()
        } else {
            Some(config.ensure_log_dir()?)
        };
        let engine = TriageEngine::new(config.destinations().to_vec())
            .context("Failed to initialize triage engine")?;

        print!(
            "{}",
            reporter.run_header(&source, config.destinations(), log_dir.as_deref(), dry_run)
        );

        let metadata = RunMetadata::starting_now(source.source_path(), config.destinations());
        let executor = Executor::new(dry_run);
        let mut outcome = engine.run(&source, &executor)?;

        if outcome.matches.is_empty() {
            println!("{}", reporter.no_matches());
            print!("{}", reporter.summary(&outcome.execution.summary, dry_run, &[]));
            return Ok(ExitStatus::Success);
        }

        print!("{}", reporter.matches(&source, &outcome.matches));

        let execution = &mut outcome.execution;
        if dry_run {
            print!("{}", reporter.preview(&execution.preview));
        } else {
            println!("\nExecuting plan:");
            print!("{}", reporter.results(&execution.results));

            if let Some(log_dir) = log_dir {
                let written = RunLogWriter::new(log_dir, config.log_formats())
                    .write(&metadata, &execution.results);
                execution.summary.log_path = written.into_iter().next();
            }
        }

        print!("{}", reporter.summary(&execution.summary, dry_run, &execution.preview));
        Ok(execution.summary.exit_status())
    }
}
