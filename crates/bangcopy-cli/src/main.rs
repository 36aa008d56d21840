mod cli;
mod commands;
mod logging;

use std::io::IsTerminal;
use std::process::ExitCode;

use anyhow::Context;
use bangcopy::ExitStatus;
use bangcopy::pipeline::{Reporter, Style};
use clap::Parser;
use cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_subscriber(cli.verbose);

    match run(&cli) {
        Ok(status) => ExitCode::from(status.code()),
        Err(e) => {
            eprintln!("ERROR: {e:#}");
            ExitCode::from(ExitStatus::FatalPrecondition.code())
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<ExitStatus> {
    // Set up Ctrl+C handler for graceful interruption
    ctrlc::set_handler(|| {
        eprintln!("\n\nInterrupted by user (Ctrl+C)");
        std::process::exit(130); // Standard exit code for SIGINT
    })
    .context("Failed to set Ctrl+C handler")?;

    let reporter = Reporter::new(style(cli.plain));
    let config_path = match &cli.config {
        Some(path) => bangcopy::paths::resolve(path),
        None => bangcopy::config::default_config_path()?,
    };

    tracing::debug!(config = %config_path.display(), dry_run = cli.dry_run, "starting");

    if let Some(action) = cli.dest_action() {
        commands::Destinations::execute(&action, &config_path, reporter)
            .context("Failed to update destinations")?;
        return Ok(ExitStatus::Success);
    }

    commands::Triage::execute(&cli.source, &config_path, cli.dry_run, reporter)
}

fn style(plain: bool) -> Style {
    if plain || std::env::var_os("NO_COLOR").is_some() || !std::io::stdout().is_terminal() {
        Style::Plain
    } else {
        Style::Color
    }
}
