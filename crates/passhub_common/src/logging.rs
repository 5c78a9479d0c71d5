//! Logging setup for the PassHub application.
//!
//! All crates log through `tracing`; the binary calls [`init`] once at
//! startup to install the subscriber.

use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber with the default log level (INFO).
pub fn init() {
    init_with_level(Level::INFO);
}

/// Initialize the tracing subscriber with a specific log level.
///
/// The level applies to the `passhub` crates; everything else follows
/// `RUST_LOG`. Safe to call more than once: only the first call installs
/// a subscriber.
pub fn init_with_level(level: Level) {
    let filter = EnvFilter::from_default_env()
        .add_directive(format!("passhub={}", level).parse().unwrap());

    let result = tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(filter)
        .try_init();

    if result.is_ok() {
        info!("Logging initialized at level: {}", level);
    }
}
