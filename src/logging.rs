//! Tracing subscriber setup for the CLI.

use tracing_subscriber::EnvFilter;

/// Environment variable holding an env-filter directive, e.g. `mathcap=trace`.
pub const LOG_ENV: &str = "MATHCAP_LOG";

/// Install a stderr subscriber.
///
/// `MATHCAP_LOG` wins when set; otherwise only warnings are shown, or debug
/// output with `verbose`.
pub fn init(verbose: bool) {
    let fallback = if verbose { "mathcap=debug" } else { "mathcap=warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
