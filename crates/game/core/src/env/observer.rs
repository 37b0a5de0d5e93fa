//! Event sinks for turn resolution.
//!
//! The core never logs; it hands every [`TurnEvent`] to a [`TurnObserver`]
//! and lets the caller decide whether to trace, record or ignore it.

use crate::engine::TurnEvent;

/// Receives events in the order the engine emits them.
pub trait TurnObserver {
    fn on_event(&mut self, turn: u64, event: &TurnEvent);
}

/// Discards every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullObserver;

impl TurnObserver for NullObserver {
    fn on_event(&mut self, _turn: u64, _event: &TurnEvent) {}
}

/// Records events with their turn number.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EventLog {
    entries: Vec<(u64, TurnEvent)>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[(u64, TurnEvent)] {
        &self.entries
    }

    pub fn events(&self) -> impl Iterator<Item = &TurnEvent> + '_ {
        self.entries.iter().map(|(_, event)| event)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drains the log, leaving it empty.
    pub fn take(&mut self) -> Vec<(u64, TurnEvent)> {
        std::mem::take(&mut self.entries)
    }
}

impl TurnObserver for EventLog {
    fn on_event(&mut self, turn: u64, event: &TurnEvent) {
        self.entries.push((turn, event.clone()));
    }
}

impl<F> TurnObserver for F
where
    F: FnMut(u64, &TurnEvent),
{
    fn on_event(&mut self, turn: u64, event: &TurnEvent) {
        self(turn, event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::CharacterId;

    #[test]
    fn event_log_records_in_order() {
        let mut log = EventLog::new();
        log.on_event(1, &TurnEvent::OgreRecovered { ogre: CharacterId(2) });
        log.on_event(2, &TurnEvent::GuardWoke { guard: CharacterId(1) });

        assert_eq!(log.len(), 2);
        assert_eq!(log.entries()[0].0, 1);
        assert_eq!(
            log.events().last(),
            Some(&TurnEvent::GuardWoke { guard: CharacterId(1) })
        );

        let drained = log.take();
        assert_eq!(drained.len(), 2);
        assert!(log.is_empty());
    }

    #[test]
    fn closures_observe_events() {
        let mut seen = 0;
        {
            let mut observer = |_turn: u64, _event: &TurnEvent| seen += 1;
            observer.on_event(1, &TurnEvent::OgreStuck { ogre: CharacterId(3) });
        }
        assert_eq!(seen, 1);
    }
}
