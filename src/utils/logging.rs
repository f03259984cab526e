//! Logging utilities
//!
//! Provides logging setup and configuration.

use env_logger::{Builder, Env};

/// Setup logging for the client.
///
/// `RUST_LOG` wins when set; otherwise info and above go to stderr so a
/// listing on stdout stays clean.
pub fn setup_logging() {
    Builder::from_env(Env::default().default_filter_or("info"))
        .format_target(false)
        .init();
}
