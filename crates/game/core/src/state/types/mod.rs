pub mod character;
pub mod common;
pub mod entity;
pub mod features;
pub mod grid;

// Re-export character variants
pub use character::{
    Character, CharacterRef, Guard, GuardBehavior, GuardPersonality, Hero, HeroFlags, Ogre,
    StunState, captures,
};

// Re-export common types
pub use common::{CharacterId, Command, Direction, InvalidCommand, Position};

// Re-export entity base types
pub use entity::{Entity, Weapon};

// Re-export static map features
pub use features::{Door, Unlocker, UnlockerKind};

// Re-export grid storage
pub use grid::{Cell, Grid, GridError, MapDimensions};
