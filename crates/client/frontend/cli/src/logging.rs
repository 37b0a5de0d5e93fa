//! Tracing subscriber setup for the terminal driver.
use std::io;

/// Logs to stderr, filtered by `RUST_LOG` on top of an INFO default.
///
/// Stdout stays free for the grid dump.
pub fn setup_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(io::stderr)
        .init();
}
