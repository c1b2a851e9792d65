//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

/// Default filter for a given `-v` count.
#[must_use]
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Install the global subscriber. `RUST_LOG` wins over `-v`.
///
/// Logs go to stderr so `--json` output on stdout stays parseable.
pub fn init(verbosity: u8) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity))),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
