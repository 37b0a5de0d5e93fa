//! Forwards turn events to `tracing`.
use game_core::{TurnEvent, TurnObserver};

/// Logs unlock and terminal events at info, movement detail at debug.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingObserver;

impl TurnObserver for TracingObserver {
    fn on_event(&mut self, turn: u64, event: &TurnEvent) {
        match event {
            TurnEvent::LevelStarted { index, name } => {
                tracing::info!(turn, level = index, "Level {} started: {}", index, name);
            }
            TurnEvent::HeroMoved { from, to } => {
                tracing::debug!(turn, "Hero moved {} -> {}", from, to);
            }
            TurnEvent::HeroBlocked { at } => {
                tracing::debug!(turn, "Hero blocked at {}", at);
            }
            TurnEvent::KeyAcquired { at } => {
                tracing::info!(turn, "Hero picked up the key at {}", at);
            }
            TurnEvent::LeverPulled { at } => {
                tracing::info!(turn, "Hero pulled the lever at {}", at);
            }
            TurnEvent::ExitsOpened { by } => {
                tracing::info!(turn, unlocker = %by, "Exits opened");
            }
            TurnEvent::Escaped { at } => {
                tracing::info!(turn, "Hero escaped through {}", at);
            }
            TurnEvent::Captured { by } => {
                tracing::info!(turn, "Hero captured by {}", by);
            }
            TurnEvent::Fatality { by } => {
                tracing::info!(turn, "Hero clubbed by {}", by);
            }
            TurnEvent::OgreStunned { ogre, turns } => {
                tracing::info!(turn, "{} stunned for {} turns", ogre, turns);
            }
            TurnEvent::OgreRecovered { ogre } => {
                tracing::debug!(turn, "{} recovered", ogre);
            }
            TurnEvent::OgreStuck { ogre } => {
                tracing::debug!(turn, "{} found no free cell and held still", ogre);
            }
            TurnEvent::GuardBlocked { guard, at } => {
                tracing::debug!(turn, "{} blocked at {}", guard, at);
            }
            TurnEvent::GuardSpotted { guard, direction } => {
                tracing::debug!(turn, "{} spotted the hero to the {}", guard, direction);
            }
            TurnEvent::GuardDozed { guard, turns } => {
                tracing::debug!(turn, "{} dozed off for {} turns", guard, turns);
            }
            TurnEvent::GuardWoke { guard } => {
                tracing::debug!(turn, "{} woke up", guard);
            }
            TurnEvent::LevelFinished { index, status } => {
                tracing::info!(turn, level = index, %status, "Level {} finished", index);
            }
        }
    }
}
