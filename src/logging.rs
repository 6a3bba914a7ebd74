//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "HABITUAL_LOG";

/// Directive used when `HABITUAL_LOG` is unset.
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose { "habitual=debug,warn" } else { "warn" }
}

/// Install the global subscriber writing to stderr.
///
/// Safe to call more than once; later calls are ignored.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .try_init();
}
