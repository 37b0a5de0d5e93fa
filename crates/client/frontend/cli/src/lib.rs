//! Terminal driver for the dungeon-escape game.
//!
//! Reads hero commands from a line-oriented input, feeds them to a
//! [`game_core::Game`] one character at a time, and prints the grid after
//! every line. Turn events go to `tracing` through [`TracingObserver`].

mod app;
mod config;
pub mod logging;
mod observer;

pub use app::CliApp;
pub use config::CliConfig;
pub use observer::TracingObserver;
