//! Logging setup for the command-line front end.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Initialise logging to stderr.
///
/// `RUST_LOG` overrides the level when set; otherwise only warnings are shown,
/// or everything down to `debug` when `verbose` is true.
pub fn init(verbose: bool) {
    let filter = if verbose { "debug" } else { "warn" };
    // a second init (tests, embedding hosts) keeps the first subscriber
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}
