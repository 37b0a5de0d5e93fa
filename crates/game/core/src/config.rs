use crate::error::{ErrorSeverity, GameError};
use crate::state::GuardPersonality;

/// Game configuration constants and tunable parameters.
///
/// Percentages are whole numbers in `0..=100`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Personality given to guards in built-in guard levels.
    pub guard_personality: GuardPersonality,
    /// Number of ogres spawned in built-in ogre levels.
    pub ogre_count: u8,
    /// Chance per turn that a suspicious guard looks along its four axes.
    pub suspicious_sight_chance: u8,
    /// Chance that a drunken guard repeats its previous direction.
    pub drunken_persistence: u8,
    /// Chance per turn that an awake drunken guard dozes off.
    pub drunken_doze_chance: u8,
    /// Turns a drunken guard sleeps once it dozes off.
    pub drunken_doze_turns: u8,
    /// Turns an ogre stays stunned after a hit.
    pub stun_turns: u8,
    /// Upper bound on joint ogre/club moves tried per turn. At 16 or more every
    /// pair of directions gets a try.
    pub max_placement_attempts: u16,
}

impl GameConfig {
    // ===== compile-time constants =====
    pub const MIN_OGRES: u8 = 1;
    pub const MAX_OGRES: u8 = 5;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_OGRE_COUNT: u8 = 2;
    pub const DEFAULT_SIGHT_CHANCE: u8 = 50;
    pub const DEFAULT_DRUNKEN_PERSISTENCE: u8 = 75;
    pub const DEFAULT_DOZE_CHANCE: u8 = 10;
    pub const DEFAULT_DOZE_TURNS: u8 = 3;
    pub const DEFAULT_STUN_TURNS: u8 = 2;
    pub const DEFAULT_PLACEMENT_ATTEMPTS: u16 = 32;

    pub fn new() -> Self {
        Self {
            guard_personality: GuardPersonality::Rookie,
            ogre_count: Self::DEFAULT_OGRE_COUNT,
            suspicious_sight_chance: Self::DEFAULT_SIGHT_CHANCE,
            drunken_persistence: Self::DEFAULT_DRUNKEN_PERSISTENCE,
            drunken_doze_chance: Self::DEFAULT_DOZE_CHANCE,
            drunken_doze_turns: Self::DEFAULT_DOZE_TURNS,
            stun_turns: Self::DEFAULT_STUN_TURNS,
            max_placement_attempts: Self::DEFAULT_PLACEMENT_ATTEMPTS,
        }
    }

    #[must_use]
    pub fn with_guard_personality(mut self, personality: GuardPersonality) -> Self {
        self.guard_personality = personality;
        self
    }

    #[must_use]
    pub fn with_ogre_count(mut self, ogre_count: u8) -> Self {
        self.ogre_count = ogre_count;
        self
    }

    /// Checks every tunable against its allowed range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(Self::MIN_OGRES..=Self::MAX_OGRES).contains(&self.ogre_count) {
            return Err(ConfigError::OgreCount {
                value: self.ogre_count,
                min: Self::MIN_OGRES,
                max: Self::MAX_OGRES,
            });
        }

        let percentages = [
            ("suspicious_sight_chance", self.suspicious_sight_chance),
            ("drunken_persistence", self.drunken_persistence),
            ("drunken_doze_chance", self.drunken_doze_chance),
        ];
        for (field, value) in percentages {
            if value > 100 {
                return Err(ConfigError::Percentage { field, value });
            }
        }

        if self.stun_turns == 0 {
            return Err(ConfigError::Zero { field: "stun_turns" });
        }
        if self.drunken_doze_turns == 0 {
            return Err(ConfigError::Zero {
                field: "drunken_doze_turns",
            });
        }
        if self.max_placement_attempts == 0 {
            return Err(ConfigError::Zero {
                field: "max_placement_attempts",
            });
        }

        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Out-of-range configuration values.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("ogre count {value} is outside {min}..={max}")]
    OgreCount { value: u8, min: u8, max: u8 },

    #[error("{field} must be a percentage, got {value}")]
    Percentage {
        field: &'static str,
        value: u8,
    },

    #[error("{field} must be at least 1")]
    Zero {
        field: &'static str,
    },
}

impl GameError for ConfigError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::OgreCount { .. } => "CONFIG_OGRE_COUNT",
            Self::Percentage { .. } => "CONFIG_PERCENTAGE",
            Self::Zero { .. } => "CONFIG_ZERO",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(GameConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_ogre_count_outside_range() {
        let config = GameConfig::new().with_ogre_count(0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::OgreCount { value: 0, .. })
        ));

        let config = GameConfig::new().with_ogre_count(GameConfig::MAX_OGRES + 1);
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_percentages_above_hundred() {
        let config = GameConfig {
            drunken_persistence: 101,
            ..GameConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::Percentage {
                field: "drunken_persistence",
                value: 101
            })
        );
    }

    #[test]
    fn rejects_zero_stun() {
        let config = GameConfig {
            stun_turns: 0,
            ..GameConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::Zero {
                field: "stun_turns"
            })
        );
    }
}
