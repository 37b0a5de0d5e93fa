//! Hero movement and collision resolution.

use crate::state::{
    Command, GridError, HeroFlags, Level, LevelParts, Position, UnlockerKind,
};

use super::TurnEvent;

/// Moves the hero and resolves what it ran into.
///
/// Collisions are classified first and resolved afterwards, with exits
/// taking precedence over walls and walls over objects.
pub(super) fn resolve(
    level: &mut Level,
    command: Command,
    events: &mut Vec<TurnEvent>,
) -> Result<(), GridError> {
    let mut notes = Vec::new();
    let mut opened_by = None;
    let mut collected = None;

    let LevelParts { terrain, hero, .. } = level.parts_mut();
    hero.clear_transient();
    let from = hero.position();
    hero.body_mut().apply(command);
    let target = hero.position();

    let exit = terrain.exit_at(target);
    if exit.is_some() {
        hero.insert_flags(HeroFlags::EXIT_COLLIDING);
    } else if terrain.blocks_hero(target)? {
        hero.insert_flags(HeroFlags::WALL_COLLIDING);
    }
    let unlocker = terrain
        .unlocker_at(target)
        .map(|(index, unlocker)| (index, unlocker.kind));
    if unlocker.is_some() {
        hero.insert_flags(HeroFlags::OBJECT_COLLIDING);
    }

    let flags = hero.flags();
    if flags.contains(HeroFlags::EXIT_COLLIDING) {
        let open = exit.is_some_and(|door| door.open) || hero.exit_opened();
        if open {
            hero.insert_flags(HeroFlags::ESCAPED);
            notes.push(TurnEvent::Escaped { at: target });
        } else if hero.has_key() {
            hero.insert_flags(HeroFlags::EXIT_OPENED);
            hero.revert_to_previous();
            opened_by = Some(UnlockerKind::Key);
        } else {
            hero.revert_to_previous();
            notes.push(TurnEvent::HeroBlocked { at: target });
        }
    } else if flags.contains(HeroFlags::WALL_COLLIDING) {
        hero.revert_to_previous();
        notes.push(TurnEvent::HeroBlocked { at: target });
    } else if let Some((index, kind)) = unlocker {
        match kind {
            UnlockerKind::Lever => {
                if !hero.exit_opened() {
                    hero.insert_flags(HeroFlags::EXIT_OPENED);
                    notes.push(TurnEvent::LeverPulled { at: target });
                    opened_by = Some(UnlockerKind::Lever);
                }
            }
            UnlockerKind::Key => {
                hero.take_key();
                collected = Some(index);
                notes.push(TurnEvent::KeyAcquired { at: target });
            }
        }
    }

    hero.clear_transient();
    hero.sync_weapon();
    let to: Position = hero.position();

    if to != from {
        events.push(TurnEvent::HeroMoved { from, to });
    }
    events.append(&mut notes);

    if let Some(by) = opened_by {
        level.open_exits();
        events.push(TurnEvent::ExitsOpened { by });
    }
    if let Some(index) = collected {
        level.collect_unlocker(index);
    }
    Ok(())
}
