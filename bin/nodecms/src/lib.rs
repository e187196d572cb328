//! nodecms CLI Library
//!
//! This library provides the core functionality for the nodecms CLI. It is
//! designed to be used by the binary entry point while also exposing public
//! APIs for documentation and integration purposes.
//!
//! # Modules
//!
//! - [`cmd`] - Command implementations (build, watch, check)
//! - [`server`] - Development server with JSON API and live reload
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use nodecms::cmd;
//!
//! // Build the site into the configured output directory
//! cmd::build::run(Path::new("nodecms.toml"), None).unwrap();
//! ```

pub mod cmd;
pub mod server;

// Re-export core types for convenience
pub use nodecms_core::{BuildError, Config, Phase};
pub use nodecms_generator::{BuildReport, Builder};

/// Initialize tracing with the specified verbosity level.
///
/// # Arguments
///
/// * `verbose` - Verbosity level (0 = WARN, 1 = INFO, 2 = DEBUG, 3+ = TRACE)
///
/// # Example
///
/// ```no_run
/// nodecms::init_tracing(2); // Enable DEBUG level logging
/// ```
pub fn init_tracing(verbose: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}
