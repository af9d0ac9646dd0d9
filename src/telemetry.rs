//! Tracing initialization.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Installs the global subscriber.
///
/// Reads `TAILGATE_LOG` for filter directives, e.g.
/// `TAILGATE_LOG=tailgate=debug`. Falls back to `tailgate=info`.
/// Safe to call more than once.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env("TAILGATE_LOG")
            .unwrap_or_else(|_| EnvFilter::new("tailgate=info"));

        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .with(filter)
            .init();
    });
}
