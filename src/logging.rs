//! `tracing` setup.
//!
//! Events go to stderr so stdout stays clean for reports and `--json`.
//! The filter is read from `RAP_LOG`, falling back to the given default.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::config::LOG_ENV;

/// Install the global subscriber. Later calls are no-ops.
pub fn init(default_filter: &str) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .try_init();
}
