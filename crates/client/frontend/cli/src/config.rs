//! CLI configuration from environment variables.
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use game_content::{CampaignLoader, ConfigLoader};
use game_core::{GameConfig, GuardPersonality, LevelLayout};

/// Seed used when `ESCAPE_SEED` is unset.
pub const DEFAULT_SEED: u64 = 0x5eed;

/// Settings needed to start a game from the terminal.
#[derive(Clone, Debug, Default)]
pub struct CliConfig {
    pub seed: Option<u64>,
    /// Campaign TOML; the built-in campaign when unset.
    pub campaign: Option<PathBuf>,
    /// Game config TOML; defaults when unset.
    pub game_config: Option<PathBuf>,
    pub guard: Option<GuardPersonality>,
    pub ogres: Option<u8>,
}

impl CliConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `ESCAPE_SEED` - Game seed (default: fixed seed)
    /// - `ESCAPE_CAMPAIGN` - Path to a campaign TOML (default: built-in levels)
    /// - `ESCAPE_CONFIG` - Path to a game config TOML (default: built-in tunables)
    /// - `ESCAPE_GUARD` - Guard personality override: rookie, suspicious, drunken
    /// - `ESCAPE_OGRES` - Ogre count override for ogre levels
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            seed: read(&lookup, "ESCAPE_SEED"),
            campaign: lookup("ESCAPE_CAMPAIGN").map(PathBuf::from),
            game_config: lookup("ESCAPE_CONFIG").map(PathBuf::from),
            guard: read(&lookup, "ESCAPE_GUARD"),
            ogres: read(&lookup, "ESCAPE_OGRES"),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed.unwrap_or(DEFAULT_SEED)
    }

    /// Loads the game config file, if any, then applies the overrides.
    pub fn load_game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.game_config {
            Some(path) => ConfigLoader::load(path)
                .with_context(|| format!("loading game config {}", path.display()))?,
            None => GameConfig::default(),
        };
        if let Some(guard) = self.guard {
            config = config.with_guard_personality(guard);
        }
        if let Some(ogres) = self.ogres {
            config = config.with_ogre_count(ogres);
        }
        config.validate().context("invalid game config overrides")?;
        Ok(config)
    }

    pub fn load_campaign(&self) -> Result<Vec<LevelLayout>> {
        match &self.campaign {
            Some(path) => CampaignLoader::load(path)
                .with_context(|| format!("loading campaign {}", path.display())),
            None => Ok(game_content::builtin_campaign()),
        }
    }
}

fn read<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: FromStr,
{
    lookup(key)?.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> CliConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        CliConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_without_variables() {
        let config = config(&[]);
        assert_eq!(config.seed(), DEFAULT_SEED);
        assert_eq!(config.load_game_config().unwrap(), GameConfig::default());
        assert_eq!(config.load_campaign().unwrap().len(), 2);
    }

    #[test]
    fn overrides_apply_on_top_of_defaults() {
        let config = config(&[
            ("ESCAPE_SEED", "42"),
            ("ESCAPE_GUARD", "Drunken"),
            ("ESCAPE_OGRES", "4"),
        ]);
        assert_eq!(config.seed(), 42);

        let game = config.load_game_config().unwrap();
        assert_eq!(game.guard_personality, GuardPersonality::Drunken);
        assert_eq!(game.ogre_count, 4);
    }

    #[test]
    fn unparsable_values_are_ignored() {
        let config = config(&[("ESCAPE_SEED", "soon"), ("ESCAPE_GUARD", "sober")]);
        assert_eq!(config.seed, None);
        assert_eq!(config.guard, None);
    }

    #[test]
    fn out_of_range_override_is_rejected() {
        let config = config(&[("ESCAPE_OGRES", "9")]);
        assert!(config.load_game_config().is_err());
    }

    #[test]
    fn missing_campaign_file_reports_path() {
        let config = config(&[("ESCAPE_CAMPAIGN", "/nonexistent/campaign.toml")]);
        let error = config.load_campaign().unwrap_err();
        assert!(format!("{error:#}").contains("/nonexistent/campaign.toml"));
    }
}
