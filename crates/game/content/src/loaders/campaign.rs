//! Campaign loader.
//!
//! A campaign is an ordered list of levels, each either a built-in level by
//! name or a RON layout file relative to the campaign file.

use std::path::Path;

use game_core::LevelLayout;
use serde::{Deserialize, Serialize};

use crate::levels;
use crate::loaders::{LevelLoader, LoadResult, read_file};

/// Campaign data structure for TOML files.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CampaignDataToml {
    #[serde(default)]
    name: Option<String>,
    levels: Vec<LevelEntryToml>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum LevelEntryToml {
    Builtin { builtin: String },
    File { file: String },
}

/// Loader for campaigns from TOML files.
pub struct CampaignLoader;

impl CampaignLoader {
    /// Load every level of a campaign, in order.
    pub fn load(path: &Path) -> LoadResult<Vec<LevelLayout>> {
        let content = read_file(path)?;
        let data: CampaignDataToml = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse campaign TOML: {}", e))?;

        if data.levels.is_empty() {
            anyhow::bail!(
                "Campaign {} has no levels",
                data.name.as_deref().unwrap_or("<unnamed>")
            );
        }

        let base = path.parent().unwrap_or_else(|| Path::new("."));
        data.levels
            .into_iter()
            .map(|entry| match entry {
                LevelEntryToml::Builtin { builtin } => levels::builtin(&builtin)
                    .ok_or_else(|| anyhow::anyhow!("Unknown built-in level: {}", builtin)),
                LevelEntryToml::File { file } => LevelLoader::load(&base.join(file)),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn mixes_builtin_and_file_levels() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("cell.ron"),
            r#"(name: "cell", rows: ["XXXXX", "XH GX", "X k X", "XXIXX"])"#,
        )
        .unwrap();
        let campaign = dir.path().join("campaign.toml");
        fs::write(
            &campaign,
            "name = \"mixed\"\n\n[[levels]]\nbuiltin = \"dungeon\"\n\n[[levels]]\nfile = \"cell.ron\"\n",
        )
        .unwrap();

        let layouts = CampaignLoader::load(&campaign).unwrap();
        let names: Vec<&str> = layouts.iter().map(|layout| layout.name.as_str()).collect();
        assert_eq!(names, vec!["dungeon", "cell"]);
    }

    #[test]
    fn rejects_unknown_builtin() {
        let dir = tempfile::tempdir().unwrap();
        let campaign = dir.path().join("campaign.toml");
        fs::write(&campaign, "[[levels]]\nbuiltin = \"tower\"\n").unwrap();

        let error = CampaignLoader::load(&campaign).unwrap_err();
        assert!(error.to_string().contains("tower"));
    }

    #[test]
    fn rejects_empty_campaign() {
        let dir = tempfile::tempdir().unwrap();
        let campaign = dir.path().join("campaign.toml");
        fs::write(&campaign, "levels = []\n").unwrap();
        assert!(CampaignLoader::load(&campaign).is_err());
    }

    #[test]
    fn bundled_campaign_builds() {
        use game_core::{GameConfig, Level};

        let data = Path::new(env!("CARGO_MANIFEST_DIR")).join("data");
        let layouts = CampaignLoader::load(&data.join("campaign.toml")).unwrap();
        assert_eq!(layouts.len(), 3);

        let config = crate::ConfigLoader::load(&data.join("config.toml")).unwrap();
        assert_eq!(config, GameConfig::default());
        for (offset, layout) in layouts.iter().enumerate() {
            Level::from_layout(offset as u32 + 1, layout, &config, 0).unwrap();
        }
    }
}
