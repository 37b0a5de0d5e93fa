//! Level construction from a text layout.
//!
//! A layout is a character matrix in the cell alphabet plus a handful of
//! options the matrix cannot express (unlocker kind, guard personality,
//! patrol route, movability). [`Level::from_layout`] validates it and
//! produces the initial level with its first render already on the grid.

use crate::config::GameConfig;

use super::{
    Cell, CharacterId, Direction, Door, Grid, Guard, GuardBehavior, GuardPersonality, Hero,
    HeroFlags, Level, LevelError, LevelStatus, Ogre, Position, Unlocker, UnlockerKind,
};

/// Club search order around an ogre: below, above, right, left.
const CLUB_SEARCH: [Direction; 4] = [
    Direction::Down,
    Direction::Up,
    Direction::Right,
    Direction::Left,
];

/// Declarative description of a level.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LevelLayout {
    pub name: String,
    /// Row-major character matrix, top row first.
    pub rows: Vec<String>,
    /// What the `k` cells are.
    pub unlocker: UnlockerKind,
    /// Personality for every guard; `None` defers to [`GameConfig`].
    pub guard_personality: Option<GuardPersonality>,
    /// Patrol route for suspicious guards.
    pub patrol: Vec<Direction>,
    /// Guards and ogres move on their own.
    pub movable_enemies: bool,
    /// Clubs move on their own.
    pub movable_weapons: bool,
    /// Replicate the first ogre until [`GameConfig::ogre_count`] ogres exist.
    pub replicate_ogres: bool,
}

impl LevelLayout {
    pub fn new(name: impl Into<String>, rows: Vec<String>) -> Self {
        Self {
            name: name.into(),
            rows,
            unlocker: UnlockerKind::Lever,
            guard_personality: None,
            patrol: Vec::new(),
            movable_enemies: true,
            movable_weapons: true,
            replicate_ogres: false,
        }
    }

    #[must_use]
    pub fn with_unlocker(mut self, unlocker: UnlockerKind) -> Self {
        self.unlocker = unlocker;
        self
    }

    #[must_use]
    pub fn with_guard_personality(mut self, personality: GuardPersonality) -> Self {
        self.guard_personality = Some(personality);
        self
    }

    #[must_use]
    pub fn with_patrol(mut self, patrol: Vec<Direction>) -> Self {
        self.patrol = patrol;
        self
    }

    #[must_use]
    pub fn with_movable_enemies(mut self, movable: bool) -> Self {
        self.movable_enemies = movable;
        self
    }

    #[must_use]
    pub fn with_movable_weapons(mut self, movable: bool) -> Self {
        self.movable_weapons = movable;
        self
    }

    #[must_use]
    pub fn with_replicated_ogres(mut self, replicate: bool) -> Self {
        self.replicate_ogres = replicate;
        self
    }
}

/// Entities found while scanning the matrix.
#[derive(Default)]
struct Scan {
    hero: Option<Hero>,
    guards: Vec<(Position, bool)>,
    ogres: Vec<(Position, bool)>,
    clubs: Vec<Position>,
    doors: Vec<Door>,
    unlockers: Vec<Position>,
}

impl Level {
    /// Builds the initial level from a layout.
    ///
    /// Character ids follow canonical order: the hero is `#0`, guards come
    /// next in row-major order, ogres last.
    pub fn from_layout(
        index: u32,
        layout: &LevelLayout,
        config: &GameConfig,
        game_seed: u64,
    ) -> Result<Self, LevelError> {
        config.validate()?;
        let mut grid = Grid::from_rows(&layout.rows)?;
        let dimensions = grid.dimensions();

        let mut scan = Scan::default();
        for y in 0..dimensions.height as i32 {
            for x in 0..dimensions.width as i32 {
                let position = Position::new(x, y);
                let cell = grid.get(position)?;
                let border = dimensions.is_border(position);

                if border && !matches!(cell, Cell::Wall | Cell::Door | Cell::Stairs) {
                    return Err(LevelError::OpenBorder { position, cell });
                }

                match cell {
                    Cell::Hero | Cell::ArmedHero | Cell::KeyHero => {
                        if let Some(first) = scan.hero.as_ref() {
                            return Err(LevelError::MultipleHeroes {
                                first: first.position(),
                                second: position,
                            });
                        }
                        let hero = match cell {
                            Cell::ArmedHero => Hero::armed(position),
                            Cell::KeyHero => Hero::new(position).with_key(),
                            _ => Hero::new(position),
                        };
                        scan.hero = Some(hero);
                    }
                    Cell::Guard | Cell::SleepingGuard => {
                        scan.guards.push((position, cell == Cell::SleepingGuard));
                    }
                    Cell::Ogre | Cell::StunnedOgre => {
                        scan.ogres.push((position, cell == Cell::StunnedOgre));
                    }
                    Cell::Club => scan.clubs.push(position),
                    Cell::ClubOverLever => {
                        scan.clubs.push(position);
                        scan.unlockers.push(position);
                    }
                    Cell::Lever => scan.unlockers.push(position),
                    Cell::Door if border => scan.doors.push(Door::new(position)),
                    Cell::Stairs if border => scan.doors.push(Door {
                        position,
                        open: true,
                    }),
                    Cell::Stairs => return Err(LevelError::InteriorStairs { position }),
                    Cell::Empty | Cell::Wall | Cell::Door => {}
                }
            }
        }

        let mut hero = scan.hero.ok_or(LevelError::MissingHero)?;
        if scan.doors.is_empty() {
            return Err(LevelError::MissingExit);
        }
        if scan.unlockers.is_empty() {
            return Err(LevelError::MissingUnlocker);
        }
        if scan.guards.is_empty() && scan.ogres.is_empty() {
            return Err(LevelError::MissingHostile);
        }
        if scan.doors.iter().any(|door| door.open) {
            hero.insert_flags(HeroFlags::EXIT_OPENED);
        }

        // Pair every ogre with an adjacent club, else a club in hand.
        let mut unclaimed = scan.clubs.clone();
        let mut ogres_laid_out: Vec<(Position, Position, bool)> = Vec::new();
        for (position, stunned) in &scan.ogres {
            let club = CLUB_SEARCH
                .iter()
                .map(|direction| position.step(*direction))
                .find(|candidate| unclaimed.contains(candidate));
            let club = match club {
                Some(club) => {
                    unclaimed.retain(|candidate| *candidate != club);
                    club
                }
                None => *position,
            };
            ogres_laid_out.push((*position, club, *stunned));
        }
        if let Some(position) = unclaimed.first() {
            return Err(LevelError::StrayClub {
                position: *position,
            });
        }
        if layout.replicate_ogres {
            if let Some(first) = ogres_laid_out.first().copied() {
                ogres_laid_out.resize(usize::from(config.ogre_count), first);
            }
        }

        let personality = layout
            .guard_personality
            .unwrap_or(config.guard_personality);
        let mut next_id = 1u32;

        let mut guards = Vec::with_capacity(scan.guards.len());
        for (position, asleep) in scan.guards {
            let mut behavior = GuardBehavior::for_personality(personality, layout.patrol.clone());
            if asleep {
                if let GuardBehavior::Drunken { asleep_for, .. } = &mut behavior {
                    *asleep_for = config.drunken_doze_turns;
                }
            }
            let mut guard = Guard::new(CharacterId(next_id), position, behavior);
            guard.character.body.set_movable(layout.movable_enemies);
            guard.refresh_symbol();
            guards.push(guard);
            next_id += 1;
        }

        let unlockers: Vec<Unlocker> = scan
            .unlockers
            .iter()
            .map(|position| Unlocker::new(*position, layout.unlocker))
            .collect();

        let mut ogres = Vec::with_capacity(ogres_laid_out.len());
        for (position, club, stunned) in ogres_laid_out {
            let mut ogre = Ogre::new(CharacterId(next_id), position, club);
            ogre.character.body.set_movable(layout.movable_enemies);
            ogre.club.body.set_movable(layout.movable_weapons);
            ogre.club.above_key = unlockers.iter().any(|unlocker| unlocker.position == club);
            if stunned {
                ogre.stun(config.stun_turns);
            }
            ogre.refresh_symbol();
            ogres.push(ogre);
            next_id += 1;
        }

        // The grid keeps terrain only; entities are painted back by redraw.
        for y in 0..dimensions.height as i32 {
            for x in 0..dimensions.width as i32 {
                let position = Position::new(x, y);
                let base = match grid.get(position)? {
                    Cell::ClubOverLever | Cell::Lever => Cell::Lever,
                    cell @ (Cell::Wall | Cell::Door | Cell::Stairs) => cell,
                    _ => Cell::Empty,
                };
                grid.set(position, base)?;
            }
        }

        let mut level = Level {
            index,
            name: layout.name.clone(),
            game_seed,
            turn: 0,
            status: LevelStatus::Playing,
            grid,
            hero,
            guards,
            ogres,
            doors: scan.doors,
            unlockers,
            painted: Vec::new(),
        };
        level.redraw()?;
        Ok(level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::StunState;

    fn rows(rows: &[&str]) -> Vec<String> {
        rows.iter().map(|row| row.to_string()).collect()
    }

    fn build(layout: LevelLayout) -> Result<Level, LevelError> {
        Level::from_layout(1, &layout, &GameConfig::default(), 7)
    }

    #[test]
    fn builds_guard_level() {
        let layout = LevelLayout::new("cell", rows(&["XXXXX", "XH GX", "X kIX", "XXIXX"]))
            .with_guard_personality(GuardPersonality::Suspicious)
            .with_patrol(vec![Direction::Left, Direction::Right]);
        let level = build(layout).unwrap();

        assert_eq!(level.hero().position(), Position::new(1, 1));
        assert_eq!(level.guards().len(), 1);
        assert_eq!(level.guards()[0].id(), CharacterId(1));
        assert_eq!(level.guards()[0].personality(), GuardPersonality::Suspicious);
        assert_eq!(level.doors(), &[Door::new(Position::new(2, 3))]);
        assert_eq!(level.unlockers().len(), 1);
        assert_eq!(level.grid().get(Position::new(3, 2)), Ok(Cell::Door));
        assert_eq!(level.to_string(), "XXXXX\nXH GX\nX kIX\nXXIXX\n");
        assert_eq!(level.status(), LevelStatus::Playing);
    }

    #[test]
    fn pairs_ogres_with_adjacent_clubs() {
        let layout = LevelLayout::new("keep", rows(&["XXXXXX", "I *O X", "X   kX", "XA   X", "XXXXXX"]))
            .with_unlocker(UnlockerKind::Key);
        let level = build(layout).unwrap();

        let ogre = &level.ogres()[0];
        assert_eq!(ogre.position(), Position::new(3, 1));
        assert_eq!(ogre.club.position(), Position::new(2, 1));
        assert!(level.hero().is_armed());
        assert_eq!(level.to_string(), "XXXXXX\nI *O X\nX   kX\nXA   X\nXXXXXX\n");
    }

    #[test]
    fn ogre_without_club_holds_it_in_place() {
        let layout = LevelLayout::new("keep", rows(&["XXXXX", "I O X", "X  kX", "XH  X", "XXXXX"]));
        let level = build(layout).unwrap();
        let ogre = &level.ogres()[0];
        assert_eq!(ogre.club.position(), ogre.position());
    }

    #[test]
    fn replicates_ogres_to_configured_count() {
        let layout = LevelLayout::new("keep", rows(&["XXXXXX", "I *O X", "X   kX", "XA   X", "XXXXXX"]))
            .with_replicated_ogres(true);
        let config = GameConfig::default().with_ogre_count(4);
        let level = Level::from_layout(2, &layout, &config, 0).unwrap();

        assert_eq!(level.ogres().len(), 4);
        let ids: Vec<CharacterId> = level.ogres().iter().map(Ogre::id).collect();
        assert_eq!(
            ids,
            vec![CharacterId(1), CharacterId(2), CharacterId(3), CharacterId(4)]
        );
        assert!(
            level
                .ogres()
                .iter()
                .all(|ogre| ogre.position() == Position::new(3, 1))
        );
    }

    #[test]
    fn stunned_ogre_starts_stunned() {
        let layout = LevelLayout::new("keep", rows(&["XXXXX", "I 8*X", "X  kX", "XA  X", "XXXXX"]));
        let level = build(layout).unwrap();
        assert_eq!(
            level.ogres()[0].stun_state(),
            StunState::Stunned {
                turns_left: GameConfig::DEFAULT_STUN_TURNS
            }
        );
    }

    #[test]
    fn club_over_lever_is_both() {
        let layout = LevelLayout::new("keep", rows(&["XXXXX", "I O$X", "X   X", "XA  X", "XXXXX"]));
        let level = build(layout).unwrap();
        assert_eq!(level.unlockers()[0].position, Position::new(3, 1));
        assert!(level.ogres()[0].club.above_key);
        assert_eq!(level.grid().get(Position::new(3, 1)), Ok(Cell::ClubOverLever));
    }

    #[test]
    fn rejects_invalid_layouts() {
        let cases: [(&[&str], LevelError); 7] = [
            (
                &["XXXX", "XH G", "XkXX", "XIXX"],
                LevelError::OpenBorder {
                    position: Position::new(3, 1),
                    cell: Cell::Guard,
                },
            ),
            (&["XXXXX", "X  GX", "X k X", "XXIXX"], LevelError::MissingHero),
            (&["XXXXX", "XH GX", "X k X", "XXXXX"], LevelError::MissingExit),
            (&["XXXXX", "XH GX", "X   X", "XXIXX"], LevelError::MissingUnlocker),
            (&["XXXXX", "XH  X", "X k X", "XXIXX"], LevelError::MissingHostile),
            (
                &["XXXXX", "XHG*X", "X k X", "XXIXX"],
                LevelError::StrayClub {
                    position: Position::new(3, 1),
                },
            ),
            (
                &["XXXXX", "XHSGX", "X k X", "XXIXX"],
                LevelError::InteriorStairs {
                    position: Position::new(2, 1),
                },
            ),
        ];
        for (layout, expected) in cases {
            let layout = LevelLayout::new("bad", rows(layout));
            assert_eq!(build(layout), Err(expected));
        }
    }

    #[test]
    fn rejects_second_hero() {
        let layout = LevelLayout::new("bad", rows(&["XXXXX", "XHAGX", "X k X", "XXIXX"]));
        assert_eq!(
            build(layout),
            Err(LevelError::MultipleHeroes {
                first: Position::new(1, 1),
                second: Position::new(2, 1),
            })
        );
    }

    #[test]
    fn rejects_invalid_config() {
        let layout = LevelLayout::new("cell", rows(&["XXXXX", "XH GX", "X k X", "XXIXX"]));
        let config = GameConfig::default().with_ogre_count(0);
        assert!(matches!(
            Level::from_layout(1, &layout, &config, 0),
            Err(LevelError::InvalidConfig(_))
        ));
    }
}
