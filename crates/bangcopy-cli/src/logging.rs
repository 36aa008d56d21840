//! Tracing subscriber setup

use tracing_subscriber::EnvFilter;

/// Environment variable holding a tracing filter directive
const LOG_ENV: &str = "BANG_LOG";

/// Install the global subscriber. Diagnostics go to stderr so they never
/// mix with the report on stdout.
///
/// `BANG_LOG` wins when set; otherwise `verbose` picks DEBUG over WARN.
pub fn init_subscriber(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

    // A second init (tests) is harmless
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
