//! Falcon CLI library.
//!
//! The binary in `main.rs` is a thin dispatcher; everything it calls
//! lives here so commands stay testable:
//! - [`commands`]: one handler per subcommand
//! - [`config`]: the persisted AI credential (`~/.falcon/config.json`)
//! - [`providers`]: HTTP-backed AI and network capabilities
//!
//! The interpreter itself never reads configuration; this crate resolves
//! the credential and hands capability objects to the builder.

use std::sync::Once;

pub mod commands;
pub mod config;
pub mod providers;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for the CLI.
///
/// Call this once at startup. Safe to call multiple times. The filter
/// comes from `FALCON_LOG` (`warn` when unset); events go to stderr so
/// program output on stdout stays clean.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        let filter =
            EnvFilter::try_from_env("FALCON_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
            .with(filter)
            .init();
    });
}
