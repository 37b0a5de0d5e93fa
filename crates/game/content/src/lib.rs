//! Data-driven level content and loaders.
//!
//! This crate houses the built-in campaign and provides loaders for data files:
//! - Level layouts (data-driven via RON)
//! - Campaigns, an ordered list of built-in or file levels (data-driven via TOML)
//! - Game configuration (data-driven via TOML)
//!
//! All loaders produce game-core types directly.

pub mod levels;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use levels::{BUILTIN_LEVELS, builtin, builtin_campaign};

#[cfg(feature = "loaders")]
pub use loaders::{CampaignLoader, ConfigLoader, LevelLoader};
