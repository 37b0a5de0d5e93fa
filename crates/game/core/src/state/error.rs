//! Level construction errors.
//!
//! Every variant but [`LevelError::Grid`] is a configuration error: the level
//! is rejected before the first turn is played.

use crate::config::ConfigError;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{Cell, GridError, Position};

/// Errors raised while building a level from its layout.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LevelError {
    /// Layout has no rows or its rows are empty.
    #[error("level layout is empty")]
    EmptyLayout,

    /// A row differs in length from the first row.
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A character outside the cell alphabet.
    #[error("unknown symbol {symbol:?} at {position}")]
    UnknownSymbol { symbol: char, position: Position },

    /// Border cells must be walls or exits.
    #[error("border cell {position} holds {cell}, expected a wall or an exit")]
    OpenBorder { position: Position, cell: Cell },

    #[error("level has no hero")]
    MissingHero,

    #[error("level has more than one hero (at {first} and {second})")]
    MultipleHeroes { first: Position, second: Position },

    #[error("level has no exit door on its border")]
    MissingExit,

    /// Open exits belong on the border.
    #[error("stairs at {position} are not on the border")]
    InteriorStairs { position: Position },

    #[error("level has no lever or key")]
    MissingUnlocker,

    #[error("level has no guard or ogre")]
    MissingHostile,

    /// A club symbol with no ogre next to it.
    #[error("club at {position} has no adjacent ogre")]
    StrayClub { position: Position },

    #[error("campaign has no levels")]
    EmptyCampaign,

    #[error("invalid game configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    /// Cell access outside the grid while laying the level out.
    #[error(transparent)]
    Grid(#[from] GridError),
}

impl GameError for LevelError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Grid(_) => ErrorSeverity::Internal,
            _ => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyLayout => "LEVEL_EMPTY_LAYOUT",
            Self::RaggedRow { .. } => "LEVEL_RAGGED_ROW",
            Self::UnknownSymbol { .. } => "LEVEL_UNKNOWN_SYMBOL",
            Self::OpenBorder { .. } => "LEVEL_OPEN_BORDER",
            Self::MissingHero => "LEVEL_MISSING_HERO",
            Self::MultipleHeroes { .. } => "LEVEL_MULTIPLE_HEROES",
            Self::MissingExit => "LEVEL_MISSING_EXIT",
            Self::InteriorStairs { .. } => "LEVEL_INTERIOR_STAIRS",
            Self::MissingUnlocker => "LEVEL_MISSING_UNLOCKER",
            Self::MissingHostile => "LEVEL_MISSING_HOSTILE",
            Self::StrayClub { .. } => "LEVEL_STRAY_CLUB",
            Self::EmptyCampaign => "LEVEL_EMPTY_CAMPAIGN",
            Self::InvalidConfig(_) => "LEVEL_INVALID_CONFIG",
            Self::Grid(_) => "LEVEL_GRID_BOUNDS",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::MapDimensions;

    #[test]
    fn bounds_errors_are_internal() {
        let error = LevelError::from(GridError::OutOfBounds {
            position: Position::new(9, 9),
            dimensions: MapDimensions::new(4, 4),
        });
        assert_eq!(error.severity(), ErrorSeverity::Internal);
        assert_eq!(error.error_code(), "LEVEL_GRID_BOUNDS");
        assert_eq!(LevelError::MissingHero.severity(), ErrorSeverity::Fatal);
    }
}
