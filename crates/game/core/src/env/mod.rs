//! Collaborators the engine borrows for a turn.
//!
//! The [`TurnEnv`] aggregate bundles the tunables, the RNG oracle and the
//! event observer so the engine can access everything it needs without
//! hard coupling to concrete implementations.
mod observer;
mod rng;

pub use observer::{EventLog, NullObserver, TurnObserver};
pub use rng::{Dice, PcgRng, RngOracle, compute_seed};

use crate::config::GameConfig;

/// Everything a turn reads from outside the level.
pub struct TurnEnv<'a> {
    config: &'a GameConfig,
    rng: &'a dyn RngOracle,
    observer: &'a mut dyn TurnObserver,
}

impl<'a> TurnEnv<'a> {
    pub fn new(
        config: &'a GameConfig,
        rng: &'a dyn RngOracle,
        observer: &'a mut dyn TurnObserver,
    ) -> Self {
        Self {
            config,
            rng,
            observer,
        }
    }

    pub fn config(&self) -> &'a GameConfig {
        self.config
    }

    pub fn rng(&self) -> &'a dyn RngOracle {
        self.rng
    }

    pub fn observer(&mut self) -> &mut dyn TurnObserver {
        &mut *self.observer
    }
}
