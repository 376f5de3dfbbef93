//! Logging bootstrap.

use tracing_subscriber::EnvFilter;

/// Installs a global `tracing` subscriber writing to stderr.
///
/// `RUST_LOG` takes precedence when set. Otherwise the level is `debug`
/// when `verbose` is set and `info` if not.
///
/// Returns false if a global subscriber was already installed.
pub fn init_logging(verbose: bool) -> bool {
    let fallback = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}
