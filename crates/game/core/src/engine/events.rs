//! Turn events.
//!
//! Events describe what happened during a turn in domain terms. The engine
//! emits them in resolution order; observers decide what to do with them.

use crate::state::{CharacterId, Direction, LevelStatus, Position, UnlockerKind};

/// High-level occurrences during turn resolution.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TurnEvent {
    /// A level was loaded and rendered.
    LevelStarted { index: u32, name: String },

    /// The hero ended its move on a new cell.
    HeroMoved { from: Position, to: Position },

    /// The hero bumped into a wall or a closed door and stayed put.
    HeroBlocked { at: Position },

    /// The hero picked up the key.
    KeyAcquired { at: Position },

    /// The hero stepped on the lever.
    LeverPulled { at: Position },

    /// Every exit door turned into stairs.
    ExitsOpened { by: UnlockerKind },

    /// The hero left through an open exit.
    Escaped { at: Position },

    /// A guard or ogre caught the unarmed hero.
    Captured { by: CharacterId },

    /// An active ogre's club landed on the hero.
    Fatality { by: CharacterId },

    /// The hero's weapon knocked an ogre out.
    OgreStunned { ogre: CharacterId, turns: u8 },

    /// A stunned ogre came back to its senses.
    OgreRecovered { ogre: CharacterId },

    /// No valid joint ogre/club placement was found; both stayed put.
    OgreStuck { ogre: CharacterId },

    /// A guard tried to walk into a blocked cell and stayed put.
    GuardBlocked { guard: CharacterId, at: Position },

    /// A suspicious guard saw the hero and turned toward it.
    GuardSpotted {
        guard: CharacterId,
        direction: Direction,
    },

    /// A drunken guard fell asleep.
    GuardDozed { guard: CharacterId, turns: u8 },

    /// A drunken guard woke up.
    GuardWoke { guard: CharacterId },

    /// The level reached a terminal status.
    LevelFinished { index: u32, status: LevelStatus },
}

impl TurnEvent {
    /// True for events that end the level or the hero's run.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TurnEvent::Escaped { .. }
                | TurnEvent::Captured { .. }
                | TurnEvent::Fatality { .. }
                | TurnEvent::LevelFinished { .. }
        )
    }
}
