//! Ogre and club placement.
//!
//! An ogre and its club move jointly: the ogre takes a step, then the club
//! lands one step away from the ogre's new cell. Every (ogre, club) pair of
//! directions is tried once, in an order shuffled by the dice, until one
//! lands both on open cells. Both stay where they were only when no pair
//! fits within the configured number of attempts.

use arrayvec::ArrayVec;

use crate::config::GameConfig;
use crate::env::Dice;
use crate::state::{Command, Direction, GridError, Ogre, Position, Terrain};

/// One joint move: `None` keeps the ogre still, or the club at its offset.
type Candidate = (Option<Direction>, Option<Direction>);

/// How the joint placement ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement {
    /// A valid placement was found.
    Moved,
    /// Neither the ogre nor its club moves on its own.
    Held,
    /// Every neighbour of the ogre is blocked; nothing was drawn.
    Trapped,
    /// Attempts ran out; ogre and club kept their cells.
    Stuck,
}

/// Moves the ogre (unless stunned or immobile) together with its club.
///
/// An immobile club keeps its offset from the ogre. An immobile or stunned
/// ogre still lets its club swing around it.
pub fn relocate(
    ogre: &mut Ogre,
    terrain: &Terrain<'_>,
    dice: &mut Dice<'_>,
    config: &GameConfig,
) -> Result<Placement, GridError> {
    let origin = ogre.position();
    let club_origin = ogre.club.position();
    let ogre_moves = ogre.character.body.is_movable() && !ogre.is_stunned();
    let club_moves = ogre.club.body.is_movable();

    if !ogre_moves && !club_moves {
        return Ok(Placement::Held);
    }
    if terrain.open_directions(origin)?.is_empty() {
        return Ok(Placement::Trapped);
    }

    let offset = (club_origin.x - origin.x, club_origin.y - origin.y);
    let mut candidates = candidates(ogre_moves, club_moves);
    for index in (1..candidates.len()).rev() {
        let swap = dice.roll(index as u32 + 1) as usize;
        candidates.swap(index, swap);
    }

    for (ogre_step, club_step) in candidates
        .into_iter()
        .take(usize::from(config.max_placement_attempts))
    {
        ogre.character
            .body
            .apply(ogre_step.map_or(Command::Wait, Command::Move));

        let position = ogre.position();
        let target = match club_step {
            Some(direction) => position.step(direction),
            None => Position::new(position.x + offset.0, position.y + offset.1),
        };
        ogre.club.body.move_to(target);

        if !terrain.blocks_enemy(position)? && !terrain.blocks_club(target)? {
            ogre.club.above_key = terrain.unlocker_at(target).is_some();
            ogre.refresh_symbol();
            return Ok(Placement::Moved);
        }

        ogre.character.body.revert_to_previous();
        ogre.club.body.revert_to_previous();
    }

    ogre.club.above_key = terrain.unlocker_at(club_origin).is_some();
    ogre.refresh_symbol();
    Ok(Placement::Stuck)
}

fn candidates(ogre_moves: bool, club_moves: bool) -> ArrayVec<Candidate, 16> {
    let steps = |moves: bool| -> ArrayVec<Option<Direction>, 4> {
        if moves {
            Direction::ALL.iter().copied().map(Some).collect()
        } else {
            [None].into_iter().collect()
        }
    };

    let club_steps = steps(club_moves);
    steps(ogre_moves)
        .into_iter()
        .flat_map(|ogre_step| club_steps.iter().map(move |club_step| (ogre_step, *club_step)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::PcgRng;
    use crate::state::{CharacterId, Level, LevelLayout, UnlockerKind};

    fn level(rows: &[&str]) -> Level {
        let layout = LevelLayout::new("keep", rows.iter().map(|row| row.to_string()).collect())
            .with_unlocker(UnlockerKind::Key);
        Level::from_layout(2, &layout, &GameConfig::default(), 5).unwrap()
    }

    #[test]
    fn ogre_and_club_land_on_open_cells() {
        let level = level(&["XXXXXXX", "I *O  X", "X     X", "X    kX", "XA    X", "XXXXXXX"]);
        let terrain = level.terrain();
        let rng = PcgRng;
        let config = GameConfig::default();
        let mut ogre = level.ogres()[0].clone();

        for turn in 1..=50 {
            let mut dice = Dice::new(&rng, 5, turn, ogre.id());
            let placement = relocate(&mut ogre, &terrain, &mut dice, &config).unwrap();
            assert!(matches!(placement, Placement::Moved | Placement::Stuck));
            assert!(!terrain.blocks_enemy(ogre.position()).unwrap());
            assert!(!terrain.blocks_club(ogre.club.position()).unwrap());
            assert_eq!(ogre.club.position().manhattan(ogre.position()), 1);
        }
    }

    #[test]
    fn stunned_ogre_stays_while_club_swings() {
        let level = level(&["XXXXXXX", "I *O  X", "X     X", "X    kX", "XA    X", "XXXXXXX"]);
        let terrain = level.terrain();
        let rng = PcgRng;
        let mut ogre = level.ogres()[0].clone();
        ogre.stun(2);

        let mut dice = Dice::new(&rng, 5, 1, ogre.id());
        relocate(&mut ogre, &terrain, &mut dice, &GameConfig::default()).unwrap();
        assert_eq!(ogre.position(), Position::new(3, 1));
        assert_eq!(ogre.club.position().manhattan(ogre.position()), 1);
    }

    #[test]
    fn immobile_ogre_and_club_hold() {
        let level = level(&["XXXXXX", "I *O X", "X   kX", "XA   X", "XXXXXX"]);
        let rng = PcgRng;
        let mut ogre = level.ogres()[0].clone();
        ogre.character.body.set_movable(false);
        ogre.club.body.set_movable(false);

        let mut dice = Dice::new(&rng, 0, 1, CharacterId(1));
        let placement =
            relocate(&mut ogre, &level.terrain(), &mut dice, &GameConfig::default()).unwrap();
        assert_eq!(placement, Placement::Held);
        assert_eq!(dice.draws(), 0);
        assert_eq!(ogre.club.position(), Position::new(2, 1));
    }

    #[test]
    fn trapped_ogre_draws_nothing() {
        let level = level(&["XXXXX", "XXOXX", "XXkXX", "I  AX", "XXXXX"]);
        let rng = PcgRng;
        let mut ogre = level.ogres()[0].clone();
        let mut dice = Dice::new(&rng, 0, 1, CharacterId(1));
        let placement =
            relocate(&mut ogre, &level.terrain(), &mut dice, &GameConfig::default()).unwrap();
        assert_eq!(placement, Placement::Trapped);
        assert_eq!(dice.draws(), 0);
    }

    // Dead end: the only joint move is ogre right, club back onto the ogre's origin.
    const DEAD_END: [&str; 6] = ["XXXXXX", "XXXXXX", "XXO XX", "XXkXXX", "I  A X", "XXXXXX"];

    #[test]
    fn single_legal_joint_move_is_always_found() {
        let level = level(&DEAD_END);
        let terrain = level.terrain();
        let rng = PcgRng;
        let config = GameConfig::default();

        for turn in 1..=200 {
            let mut ogre = level.ogres()[0].clone();
            let mut dice = Dice::new(&rng, 3, turn, ogre.id());
            let placement = relocate(&mut ogre, &terrain, &mut dice, &config).unwrap();
            assert_eq!(placement, Placement::Moved, "turn {turn}");
            assert_eq!(ogre.position(), Position::new(3, 2));
            assert_eq!(ogre.club.position(), Position::new(2, 2));
        }
    }

    #[test]
    fn candidates_cover_every_pair_once() {
        let all = candidates(true, true);
        assert_eq!(all.len(), 16);
        for (index, pair) in all.iter().enumerate() {
            assert!(!all[index + 1..].contains(pair));
        }
        assert_eq!(candidates(false, true).len(), 4);
        assert_eq!(candidates(true, false).len(), 4);
    }

    #[test]
    fn exhausted_attempts_keep_both_in_place() {
        // A single attempt misses the one legal joint move most of the time.
        let level = level(&DEAD_END);
        let terrain = level.terrain();
        let rng = PcgRng;
        let config = GameConfig {
            max_placement_attempts: 1,
            ..GameConfig::default()
        };
        let mut ogre = level.ogres()[0].clone();
        let origin = ogre.position();
        let club = ogre.club.position();

        for turn in 1..=20 {
            let mut dice = Dice::new(&rng, 0, turn, ogre.id());
            if relocate(&mut ogre, &terrain, &mut dice, &config).unwrap() == Placement::Stuck {
                assert_eq!(ogre.position(), origin);
                assert_eq!(ogre.club.position(), club);
                return;
            }
            ogre = level.ogres()[0].clone();
        }
        panic!("expected a stuck placement within 20 turns");
    }
}
