//! Diagnostic logging to stderr.

use std::io::IsTerminal;

use tracing_subscriber::EnvFilter;

/// Filter directives for the binary (`contractiq=debug`, `info`, ...)
pub const LOG_ENV: &str = "CONTRACTIQ_LOG";

const DEFAULT_DIRECTIVES: &str = "contractiq=warn";

/// Install the global subscriber
///
/// `CONTRACTIQ_LOG` takes precedence over `RUST_LOG`. Colours are only written when stderr is a
/// terminal. Calling this twice is harmless; the second call leaves the first subscriber in place.
pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .try_init();
}
