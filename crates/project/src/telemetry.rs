//! Tracing subscriber setup for applications embedding the workbench.
//!
//! The library crates only emit events; installing a subscriber is left to
//! the host, which calls [`init_tracing`] once at startup.

use tracing_subscriber::{fmt, EnvFilter};

use crate::config::WorkbenchConfig;

/// Install a global `fmt` subscriber.
///
/// `RUST_LOG` takes precedence over the configured log level. Fails if a
/// global subscriber is already installed.
pub fn init_tracing(
    config: &WorkbenchConfig,
) -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let builder = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true);

    if config.log_json {
        builder.json().try_init()
    } else {
        builder.try_init()
    }
}
