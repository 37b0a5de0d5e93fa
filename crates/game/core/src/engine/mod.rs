//! Turn resolution.
//!
//! The [`TurnEngine`] is the only writer of [`Level`]. One call to
//! [`TurnEngine::advance_turn`] runs the hero phase, the guard phase, the
//! ogre phase and the render, in that order, then reports the events of the
//! turn to the observer.

mod enemies;
mod errors;
mod events;
mod hero;

pub use errors::{TurnError, TurnPhase};
pub use events::TurnEvent;

use crate::env::TurnEnv;
use crate::state::{Command, Level, LevelStatus};

/// Outcome of one resolved turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnReport {
    /// Number of the turn just resolved.
    pub turn: u64,
    pub command: Command,
    pub status: LevelStatus,
    /// Events in resolution order.
    pub events: Vec<TurnEvent>,
}

/// Advances a level one hero command at a time.
pub struct TurnEngine<'a> {
    level: &'a mut Level,
}

impl<'a> TurnEngine<'a> {
    pub fn new(level: &'a mut Level) -> Self {
        Self { level }
    }

    /// Parses one input character and advances the turn.
    ///
    /// An unknown character skips the turn and leaves the level untouched.
    pub fn advance_input(
        &mut self,
        env: &mut TurnEnv<'_>,
        input: char,
    ) -> Result<TurnReport, TurnError> {
        self.ensure_playing()?;
        let command = Command::try_from(input)?;
        self.advance_turn(env, command)
    }

    /// Resolves one full turn for `command`.
    ///
    /// Once the level is over every call fails with [`TurnError::LevelOver`]
    /// and nothing changes.
    pub fn advance_turn(
        &mut self,
        env: &mut TurnEnv<'_>,
        command: Command,
    ) -> Result<TurnReport, TurnError> {
        self.ensure_playing()?;

        let mut events = Vec::new();
        hero::resolve(self.level, command, &mut events).map_err(TurnError::grid(TurnPhase::Hero))?;
        enemies::move_guards(self.level, env, &mut events)
            .map_err(TurnError::grid(TurnPhase::Guards))?;
        enemies::move_ogres(self.level, env, &mut events)
            .map_err(TurnError::grid(TurnPhase::Ogres))?;

        let status = self.level.finish_turn();
        self.level
            .redraw()
            .map_err(TurnError::grid(TurnPhase::Render))?;
        if status.is_terminal() {
            events.push(TurnEvent::LevelFinished {
                index: self.level.index(),
                status,
            });
        }

        let turn = self.level.turn();
        let observer = env.observer();
        for event in &events {
            observer.on_event(turn, event);
        }

        Ok(TurnReport {
            turn,
            command,
            status,
            events,
        })
    }

    fn ensure_playing(&self) -> Result<(), TurnError> {
        if self.level.is_over() {
            return Err(TurnError::LevelOver {
                status: self.level.status(),
            });
        }
        Ok(())
    }
}
