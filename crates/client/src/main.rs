//! Dungeon-escape game binary.
//!
//! Composition root: loads `.env`, sets up logging, builds the terminal
//! front-end from the environment and plays from stdin.
//!
//! ```bash
//! ESCAPE_GUARD=drunken ESCAPE_SEED=7 cargo run -p escape-client
//! ```

use std::io;

use anyhow::Result;
use client_frontend_cli::{CliApp, CliConfig, logging};

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    dotenvy::dotenv().ok();

    logging::setup_logging();

    let config = CliConfig::from_env();
    tracing::info!(?config, "Starting escape client");
    let mut app = CliApp::from_config(&config)?;

    let status = app.run(io::stdin().lock(), io::stdout().lock())?;
    tracing::info!(?status, "Session ended");
    Ok(())
}
