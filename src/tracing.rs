//! Tracing initialization.

use std::sync::Once;
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Initialize tracing. Safe to call multiple times.
///
/// Respects `RUST_LOG` and defaults to INFO. Output goes to stderr so
/// query results printed on stdout stay machine-readable when piped.
pub fn init() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_target(true)
            .compact()
            .with_writer(std::io::stderr);

        if let Err(e) = builder.try_init() {
            eprintln!("Failed to initialize tracing: {e}");
        }
    });
}
