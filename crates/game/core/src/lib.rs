//! Deterministic dungeon-escape rules and data types shared across clients.
//!
//! `game-core` defines the canonical rules (level layout, characters, enemy
//! AI, turn resolution) and exposes pure APIs with no I/O. All level
//! mutation flows through [`engine::TurnEngine`]; randomness comes from an
//! injected [`env::RngOracle`] and events leave through an
//! [`env::TurnObserver`], so the same seed and inputs always replay the same
//! game.
pub mod ai;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod session;
pub mod state;

pub use config::{ConfigError, GameConfig};
pub use engine::{TurnEngine, TurnError, TurnEvent, TurnPhase, TurnReport};
pub use env::{EventLog, NullObserver, PcgRng, RngOracle, TurnEnv, TurnObserver, compute_seed};
pub use error::{ErrorSeverity, GameError};
pub use session::{Game, GameStatus};
pub use state::{
    Cell, CharacterId, Command, Direction, Grid, GridError, GuardPersonality, Level, LevelError,
    LevelLayout, LevelSnapshot, LevelStatus, MapDimensions, Position, SnapshotError, Terrain,
    UnlockerKind,
};
