//! Game configuration loader.

use std::path::Path;

use game_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for game configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing keys keep their defaults; out-of-range values are rejected.
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;
        config
            .validate()
            .map_err(|e| anyhow::anyhow!("Invalid config: {}", e))?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::GuardPersonality;

    #[test]
    fn partial_config_keeps_defaults() {
        let config = ConfigLoader::parse("guard_personality = \"suspicious\"\nogre_count = 3\n")
            .unwrap();
        assert_eq!(config.guard_personality, GuardPersonality::Suspicious);
        assert_eq!(config.ogre_count, 3);
        assert_eq!(config.stun_turns, GameConfig::DEFAULT_STUN_TURNS);
    }

    #[test]
    fn rejects_out_of_range_values() {
        let error = ConfigLoader::parse("ogre_count = 9\n").unwrap_err();
        assert!(error.to_string().contains("ogre count"));
    }

    #[test]
    fn empty_file_is_default() {
        assert_eq!(ConfigLoader::parse("").unwrap(), GameConfig::default());
    }
}
