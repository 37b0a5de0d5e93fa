//! Enemy decision making.
//!
//! Policies read the terrain and draw from a per-actor [`Dice`](crate::env::Dice)
//! stream; they never touch the grid.
pub mod guard;
pub mod ogre;

pub use guard::{GuardDecision, GuardNote, decide};
pub use ogre::{Placement, relocate};
