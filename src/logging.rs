//! Diagnostic logging setup.
//!
//! Command output goes to stdout via `println!`; `tracing` events go to
//! stderr so they never mix with it.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter: warnings from this crate, errors from dependencies.
const DEFAULT_FILTER: &str = "deb_index=warn,error";

const VERBOSE_FILTER: &str = "deb_index=debug,info";

pub fn filter_directive(verbose: bool) -> &'static str {
    if verbose {
        VERBOSE_FILTER
    } else {
        DEFAULT_FILTER
    }
}

/// Install the global subscriber. `RUST_LOG` overrides the flag-based
/// filter. Calling this twice is a no-op.
pub fn init_logging(verbose: bool) {
    let env_filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_directive(verbose)))
    } else {
        EnvFilter::new(filter_directive(verbose))
    };

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(verbose);

    // Already initialized in tests
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init();
}
