//! Diagnostic logging setup for the `sdlx` binary.

use std::io;

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directive.
pub const LOG_ENV: &str = "SDLX_LOG";

/// Installs the global subscriber. Logs go to stderr so they never mix with
/// command output.
///
/// The filter comes from `SDLX_LOG` when set; otherwise `warn`, or `debug`
/// with `verbose`.
pub fn init(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));

    // A second init (e.g. in tests) keeps the first subscriber.
    let _ignored = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(false)
        .with_target(false)
        .try_init();
}
