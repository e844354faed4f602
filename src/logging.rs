//! Logging setup for applications embedding streamable-rs.
//!
//! The engine only emits `tracing` events; installing a subscriber is left to
//! the application. `init_logging` is a convenience for binaries and tests.

use crate::error::{Result, StreamError};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter when `RUST_LOG` is not set
pub const DEFAULT_LOG_DIRECTIVES: &str = "info,streamable_rs=debug";

/// Install a global `fmt` subscriber filtered by `RUST_LOG`, falling back to
/// `default_directives`.
///
/// Fails if a global subscriber is already installed.
pub fn init_logging(default_directives: &str) -> Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_directives)),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .map_err(|e| StreamError::Logging(e.to_string()))
}
