//! Logging utilities
//!
//! Provides logging setup and configuration.

use env_logger::Env;

/// Setup logging for the client.
///
/// Defaults to `warn` so log output does not interleave with the menus;
/// `RUST_LOG` overrides it.
pub fn setup_logging() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
}
