//! Multi-level play session.
//!
//! A [`Game`] walks through a campaign: escaping a level loads the next one,
//! escaping the last one wins, and any capture or fatality loses.

use crate::config::GameConfig;
use crate::engine::{TurnEngine, TurnError, TurnEvent, TurnReport};
use crate::env::{RngOracle, TurnEnv, TurnObserver, compute_seed};
use crate::state::{Level, LevelError, LevelLayout, LevelStatus};

/// Campaign-wide outcome.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameStatus {
    Playing,
    /// The hero escaped the last level.
    Won,
    /// The hero was captured or killed.
    Lost(LevelStatus),
}

impl GameStatus {
    pub fn is_over(self) -> bool {
        self != GameStatus::Playing
    }
}

/// A campaign in progress.
#[derive(Clone, Debug)]
pub struct Game {
    config: GameConfig,
    /// Every level as first built, used to load and restart levels.
    levels: Vec<Level>,
    cursor: usize,
    current: Level,
    status: GameStatus,
}

impl Game {
    /// Builds every level up front so a broken layout fails before play.
    ///
    /// Level `n` (1-based) gets its own seed derived from `seed`.
    pub fn new(campaign: &[LevelLayout], config: GameConfig, seed: u64) -> Result<Self, LevelError> {
        let mut levels = Vec::with_capacity(campaign.len());
        for (offset, layout) in campaign.iter().enumerate() {
            let index = offset as u32 + 1;
            let level_seed = compute_seed(seed, 0, index, 0);
            levels.push(Level::from_layout(index, layout, &config, level_seed)?);
        }
        let current = levels.first().cloned().ok_or(LevelError::EmptyCampaign)?;

        Ok(Self {
            config,
            levels,
            cursor: 0,
            current,
            status: GameStatus::Playing,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn level(&self) -> &Level {
        &self.current
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Advances the current level by one input character.
    ///
    /// On escape the next level is loaded and a [`TurnEvent::LevelStarted`]
    /// is appended to the report.
    pub fn play(
        &mut self,
        rng: &dyn RngOracle,
        observer: &mut dyn TurnObserver,
        input: char,
    ) -> Result<TurnReport, TurnError> {
        if self.status.is_over() {
            return Err(TurnError::LevelOver {
                status: self.current.status(),
            });
        }

        let mut report = {
            let mut env = TurnEnv::new(&self.config, rng, observer);
            TurnEngine::new(&mut self.current).advance_input(&mut env, input)?
        };

        match report.status {
            LevelStatus::Playing => {}
            LevelStatus::Escaped => {
                if let Some(next) = self.levels.get(self.cursor + 1) {
                    self.cursor += 1;
                    self.current = next.clone();
                    let started = TurnEvent::LevelStarted {
                        index: self.current.index(),
                        name: self.current.name().to_string(),
                    };
                    observer.on_event(0, &started);
                    report.events.push(started);
                } else {
                    self.status = GameStatus::Won;
                }
            }
            lost @ (LevelStatus::Captured | LevelStatus::Fatality) => {
                self.status = GameStatus::Lost(lost);
            }
        }
        Ok(report)
    }

    /// Puts the current level back in its initial state.
    pub fn restart_level(&mut self) {
        if let Some(level) = self.levels.get(self.cursor) {
            self.current = level.clone();
            self.status = GameStatus::Playing;
        }
    }
}
