//! Level layout loader.
//!
//! Loads a level from a RON file: the character matrix plus the options the
//! matrix cannot express.

use std::path::Path;

use game_core::{Command, GuardPersonality, LevelLayout, UnlockerKind};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

fn enabled() -> bool {
    true
}

/// Level data structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct LevelDataRon {
    name: String,
    rows: Vec<String>,
    #[serde(default)]
    unlocker: UnlockerKind,
    #[serde(default)]
    guard: Option<GuardPersonality>,
    /// Route in the command alphabet, e.g. `"ldddd rrrr"`.
    #[serde(default)]
    patrol: String,
    #[serde(default = "enabled")]
    movable_enemies: bool,
    #[serde(default = "enabled")]
    movable_weapons: bool,
    #[serde(default)]
    replicate_ogres: bool,
}

/// Loader for level layouts from RON files.
pub struct LevelLoader;

impl LevelLoader {
    /// Load a level layout from a RON file.
    ///
    /// The layout is only parsed here; grid validation happens when the
    /// level is built.
    pub fn load(path: &Path) -> LoadResult<LevelLayout> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid level {}: {}", path.display(), e))
    }

    /// Parse a level layout from RON text.
    pub fn parse(content: &str) -> LoadResult<LevelLayout> {
        let data: LevelDataRon = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse level RON: {}", e))?;

        let patrol = Command::parse_route(&data.patrol)
            .map_err(|e| anyhow::anyhow!("Invalid patrol route: {}", e))?;

        let mut layout = LevelLayout::new(data.name, data.rows)
            .with_unlocker(data.unlocker)
            .with_patrol(patrol)
            .with_movable_enemies(data.movable_enemies)
            .with_movable_weapons(data.movable_weapons)
            .with_replicated_ogres(data.replicate_ogres);
        if let Some(personality) = data.guard {
            layout = layout.with_guard_personality(personality);
        }
        Ok(layout)
    }
}
