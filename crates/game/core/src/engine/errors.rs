//! Error types for turn resolution.

use crate::error::{ErrorSeverity, GameError};
use crate::state::{GridError, InvalidCommand, LevelStatus};

/// Identifies which stage of the turn produced an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TurnPhase {
    Hero,
    Guards,
    Ogres,
    Render,
}

impl TurnPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TurnPhase::Hero => "hero",
            TurnPhase::Guards => "guards",
            TurnPhase::Ogres => "ogres",
            TurnPhase::Render => "render",
        }
    }
}

impl std::fmt::Display for TurnPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors surfaced while advancing a turn.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TurnError {
    /// Input outside the command alphabet. The turn is skipped.
    #[error(transparent)]
    InvalidCommand(#[from] InvalidCommand),

    /// The level already reached a terminal status.
    #[error("level is over ({status})")]
    LevelOver { status: LevelStatus },

    /// Out-of-bounds grid access during resolution.
    #[error("{phase} phase failed: {source}")]
    Grid {
        phase: TurnPhase,
        #[source]
        source: GridError,
    },
}

impl TurnError {
    pub(crate) fn grid(phase: TurnPhase) -> impl FnOnce(GridError) -> Self {
        move |source| TurnError::Grid { phase, source }
    }
}

impl GameError for TurnError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            TurnError::InvalidCommand(_) => ErrorSeverity::Recoverable,
            TurnError::LevelOver { .. } => ErrorSeverity::Validation,
            TurnError::Grid { .. } => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            TurnError::InvalidCommand(_) => "TURN_INVALID_COMMAND",
            TurnError::LevelOver { .. } => "TURN_LEVEL_OVER",
            TurnError::Grid { .. } => "TURN_GRID",
        }
    }
}
