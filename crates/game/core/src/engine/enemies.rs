//! Guard and ogre turns.

use crate::ai::{self, GuardNote, Placement};
use crate::env::{Dice, TurnEnv};
use crate::state::{GridError, HeroFlags, Level, LevelParts, captures};

use super::TurnEvent;

/// Moves every guard in canonical order, then checks for capture.
pub(super) fn move_guards(
    level: &mut Level,
    env: &TurnEnv<'_>,
    events: &mut Vec<TurnEvent>,
) -> Result<(), GridError> {
    let config = env.config();
    let LevelParts {
        terrain,
        game_seed,
        turn,
        hero,
        guards,
        ..
    } = level.parts_mut();

    for guard in guards.iter_mut() {
        let id = guard.id();
        let mut dice = Dice::new(env.rng(), game_seed, turn, id);
        let decision = ai::decide(guard, &terrain, hero.position(), &mut dice, config)?;
        match decision.note {
            Some(GuardNote::Spotted(direction)) => {
                events.push(TurnEvent::GuardSpotted { guard: id, direction })
            }
            Some(GuardNote::Dozed(turns)) => events.push(TurnEvent::GuardDozed { guard: id, turns }),
            Some(GuardNote::Woke) => events.push(TurnEvent::GuardWoke { guard: id }),
            None => {}
        }

        guard.character.body.apply(decision.command);
        if terrain.blocks_enemy(guard.position())? {
            let at = guard.position();
            guard.character.body.revert_to_previous();
            events.push(TurnEvent::GuardBlocked { guard: id, at });
        }
        guard.refresh_symbol();

        if captures(guard.position(), hero) && !hero.captured() {
            hero.insert_flags(HeroFlags::CAPTURED);
            events.push(TurnEvent::Captured { by: id });
        }
    }
    Ok(())
}

/// Moves every ogre with its club, then resolves fatality and stuns.
pub(super) fn move_ogres(
    level: &mut Level,
    env: &TurnEnv<'_>,
    events: &mut Vec<TurnEvent>,
) -> Result<(), GridError> {
    let config = env.config();
    let LevelParts {
        terrain,
        game_seed,
        turn,
        hero,
        ogres,
        ..
    } = level.parts_mut();

    for ogre in ogres.iter_mut() {
        let id = ogre.id();
        let frozen = ogre.is_stunned();

        let mut dice = Dice::new(env.rng(), game_seed, turn, id);
        if ai::relocate(ogre, &terrain, &mut dice, config)? == Placement::Stuck {
            events.push(TurnEvent::OgreStuck { ogre: id });
        }
        // A stunned ogre stays put for the whole turn it counts down, including
        // the one it recovers on.
        if frozen && ogre.tick_stun() {
            events.push(TurnEvent::OgreRecovered { ogre: id });
        }

        let target = hero.position();
        let lethal = ogre.club.hits(target) || captures(ogre.position(), hero);
        if !ogre.is_stunned() && lethal {
            if !hero.fatality() {
                events.push(TurnEvent::Fatality { by: id });
            }
            hero.insert_flags(HeroFlags::FATALITY);
        } else if hero.weapon().is_some_and(|weapon| weapon.hits(ogre.position())) {
            ogre.stun(config.stun_turns);
            hero.revert_to_previous();
            events.push(TurnEvent::OgreStunned {
                ogre: id,
                turns: config.stun_turns,
            });
        }
    }
    Ok(())
}
