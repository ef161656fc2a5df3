//! Logging initialization for the CLI.

use tracing_subscriber::EnvFilter;

/// Environment variable holding a tracing filter directive.
pub const LOG_ENV: &str = "PIPS_LOG";

/// Default filter directive for the verbosity flags.
#[must_use]
pub fn default_directive(verbose: bool, quiet: bool) -> &'static str {
    if verbose {
        "pips=debug"
    } else if quiet {
        "warn"
    } else {
        "pips=info"
    }
}

/// Install the stderr subscriber. `PIPS_LOG` overrides the flags.
///
/// Calling this more than once keeps the first subscriber.
pub fn init(verbose: bool, quiet: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose, quiet)));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .try_init();
}
