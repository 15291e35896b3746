//! Tracing subscriber setup for the binary.
//!
//! The library only emits `tracing` events; hosts embedding it install their
//! own subscriber.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static LOGGER_INIT: OnceCell<()> = OnceCell::new();

/// Installs a stderr subscriber once. `RUST_LOG` overrides `default_level`.
pub fn init_logger(default_level: &str) {
    LOGGER_INIT.get_or_init(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

        fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_line_number(true)
            .with_writer(std::io::stderr)
            .init();

        tracing::debug!(level = default_level, "logger initialized");
    });
}
