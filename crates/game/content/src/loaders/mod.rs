//! Content loaders for reading game data from files.
//!
//! Level layouts are RON, campaigns and configuration are TOML.

pub mod campaign;
pub mod config;
pub mod level;

pub use campaign::CampaignLoader;
pub use config::ConfigLoader;
pub use level::LevelLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
