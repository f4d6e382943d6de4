//! Structured logging setup for the command-line binary

use crate::io::configuration::DEFAULT_LOG_FILTER;
use crate::io::error::{Result, invalid_configuration};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install a stderr subscriber filtered by `RUST_LOG`
///
/// Falls back to `DEFAULT_LOG_FILTER` when `RUST_LOG` is unset or invalid.
///
/// # Errors
///
/// Returns `InvalidConfiguration` if a global subscriber is already installed
pub fn init_logging() -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init()
        .map_err(|e| invalid_configuration("logging", &"global subscriber", &e))
}
