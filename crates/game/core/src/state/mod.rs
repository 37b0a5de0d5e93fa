//! Authoritative level state.
//!
//! [`Level`] owns the grid and every entity on it. The engine mutates it one
//! turn at a time; everything else only reads it. The grid always holds the
//! rendered view of the last completed turn.
pub mod error;
pub mod layout;
pub mod snapshot;
pub mod types;

use std::fmt;

use arrayvec::ArrayVec;

pub use error::LevelError;
pub use layout::LevelLayout;
pub use snapshot::{LevelSnapshot, SNAPSHOT_VERSION, SnapshotError};
pub use types::{
    Cell, Character, CharacterId, CharacterRef, Command, Direction, Door, Entity, Grid, GridError,
    Guard, GuardBehavior, GuardPersonality, Hero, HeroFlags, InvalidCommand, MapDimensions, Ogre,
    Position, StunState, Unlocker, UnlockerKind, Weapon, captures,
};

/// Outcome of a level. Everything but `Playing` is terminal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum LevelStatus {
    #[default]
    Playing,
    /// The hero walked through an open exit.
    Escaped,
    /// A guard or ogre caught the unarmed hero.
    Captured,
    /// An active ogre's club landed on the hero.
    Fatality,
}

impl LevelStatus {
    pub fn is_terminal(self) -> bool {
        self != LevelStatus::Playing
    }

    /// Derives the status from hero flags: fatality, then capture, then escape.
    pub fn from_flags(flags: HeroFlags) -> Self {
        if flags.contains(HeroFlags::FATALITY) {
            LevelStatus::Fatality
        } else if flags.contains(HeroFlags::CAPTURED) {
            LevelStatus::Captured
        } else if flags.contains(HeroFlags::ESCAPED) {
            LevelStatus::Escaped
        } else {
            LevelStatus::Playing
        }
    }
}

/// One playable level: grid, characters and static features.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Level {
    index: u32,
    name: String,
    game_seed: u64,
    turn: u64,
    status: LevelStatus,
    grid: Grid,
    hero: Hero,
    guards: Vec<Guard>,
    ogres: Vec<Ogre>,
    doors: Vec<Door>,
    unlockers: Vec<Unlocker>,
    /// Cells painted by the last render, restored before the next one.
    painted: Vec<Position>,
}

impl Level {
    /// Level number within its campaign, starting at 1.
    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn game_seed(&self) -> u64 {
        self.game_seed
    }

    /// Number of completed turns.
    pub fn turn(&self) -> u64 {
        self.turn
    }

    pub fn status(&self) -> LevelStatus {
        self.status
    }

    pub fn is_over(&self) -> bool {
        self.status.is_terminal()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn dimensions(&self) -> MapDimensions {
        self.grid.dimensions()
    }

    pub fn hero(&self) -> &Hero {
        &self.hero
    }

    pub fn guards(&self) -> &[Guard] {
        &self.guards
    }

    pub fn ogres(&self) -> &[Ogre] {
        &self.ogres
    }

    pub fn doors(&self) -> &[Door] {
        &self.doors
    }

    pub fn unlockers(&self) -> &[Unlocker] {
        &self.unlockers
    }

    /// Every character in canonical order: hero, guards, then ogres.
    pub fn characters(&self) -> impl DoubleEndedIterator<Item = CharacterRef<'_>> + '_ {
        std::iter::once(CharacterRef::Hero(&self.hero))
            .chain(self.guards.iter().map(CharacterRef::Guard))
            .chain(self.ogres.iter().map(CharacterRef::Ogre))
    }

    /// Read-only terrain queries over the static features.
    pub fn terrain(&self) -> Terrain<'_> {
        Terrain {
            grid: &self.grid,
            doors: &self.doors,
            unlockers: &self.unlockers,
        }
    }

    /// Splits the level into terrain and mutable characters.
    pub(crate) fn parts_mut(&mut self) -> LevelParts<'_> {
        LevelParts {
            terrain: Terrain {
                grid: &self.grid,
                doors: &self.doors,
                unlockers: &self.unlockers,
            },
            game_seed: self.game_seed,
            turn: self.turn + 1,
            hero: &mut self.hero,
            guards: &mut self.guards,
            ogres: &mut self.ogres,
        }
    }

    /// Opens every exit door. Idempotent.
    pub(crate) fn open_exits(&mut self) {
        for door in &mut self.doors {
            door.open = true;
        }
    }

    pub(crate) fn collect_unlocker(&mut self, index: usize) {
        if let Some(unlocker) = self.unlockers.get_mut(index) {
            unlocker.collected = true;
        }
    }

    /// Closes the turn: bumps the counter and latches the status.
    pub(crate) fn finish_turn(&mut self) -> LevelStatus {
        self.turn += 1;
        self.status = LevelStatus::from_flags(self.hero.flags());
        self.status
    }

    /// Terrain symbol underneath any entity at `position`.
    pub fn base_cell(&self, position: Position) -> Cell {
        if let Some(door) = self.doors.iter().find(|door| door.position == position) {
            return door.symbol();
        }
        if self.terrain().unlocker_at(position).is_some() {
            return Cell::Lever;
        }
        Cell::Empty
    }

    /// Repaints the grid from entity state.
    ///
    /// Cells painted last time are restored to their base symbol, exit and
    /// unlocker cells are refreshed, then entities are drawn in reverse
    /// canonical order so the hero ends up on top.
    pub fn redraw(&mut self) -> Result<(), GridError> {
        for position in std::mem::take(&mut self.painted) {
            let base = self.base_cell(position);
            self.grid.set(position, base)?;
        }

        let features: Vec<(Position, Cell)> = self
            .doors
            .iter()
            .map(|door| door.position)
            .chain(self.unlockers.iter().map(|unlocker| unlocker.position))
            .map(|position| (position, self.base_cell(position)))
            .collect();

        let mut strokes: Vec<(Position, Cell)> = Vec::new();
        for character in self.characters().rev() {
            if let Some(weapon) = character.visible_weapon() {
                strokes.push((weapon.position(), weapon.body.symbol()));
            }
            strokes.push((character.position(), character.symbol()));
        }

        for (position, cell) in features {
            self.grid.set(position, cell)?;
        }
        for (position, cell) in strokes {
            self.grid.set(position, cell)?;
            self.painted.push(position);
        }
        Ok(())
    }

    /// True if at least one neighbour of `position` is enterable by an enemy.
    pub fn is_move_possible(&self, position: Position) -> Result<bool, GridError> {
        Ok(!self.terrain().open_directions(position)?.is_empty())
    }
}

impl fmt::Display for Level {
    /// The rendered grid, one row per line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.grid, f)
    }
}

/// Static map queries that stay valid while characters are borrowed mutably.
#[derive(Clone, Copy, Debug)]
pub struct Terrain<'a> {
    grid: &'a Grid,
    doors: &'a [Door],
    unlockers: &'a [Unlocker],
}

impl<'a> Terrain<'a> {
    pub fn grid(&self) -> &'a Grid {
        self.grid
    }

    pub fn exit_at(&self, position: Position) -> Option<&'a Door> {
        self.doors.iter().find(|door| door.position == position)
    }

    /// Index and value of an unlocker still lying at `position`.
    pub fn unlocker_at(&self, position: Position) -> Option<(usize, &'a Unlocker)> {
        self.unlockers
            .iter()
            .enumerate()
            .find(|(_, unlocker)| unlocker.position == position && unlocker.is_present())
    }

    /// Walls and closed interior doors stop the hero. Exits are handled apart.
    pub fn blocks_hero(&self, position: Position) -> Result<bool, GridError> {
        if self.exit_at(position).is_some() {
            return Ok(false);
        }
        Ok(matches!(self.grid.get(position)?, Cell::Wall | Cell::Door))
    }

    /// Guards and ogres stay off walls, every door and the unlocker cell.
    pub fn blocks_enemy(&self, position: Position) -> Result<bool, GridError> {
        if !self.grid.contains(position) {
            return Ok(true);
        }
        if self.exit_at(position).is_some() || self.unlocker_at(position).is_some() {
            return Ok(true);
        }
        Ok(matches!(
            self.grid.get(position)?,
            Cell::Wall | Cell::Door | Cell::Stairs
        ))
    }

    /// Clubs may rest on the unlocker but not on walls or doors.
    pub fn blocks_club(&self, position: Position) -> Result<bool, GridError> {
        if !self.grid.contains(position) || self.exit_at(position).is_some() {
            return Ok(true);
        }
        if self.unlocker_at(position).is_some() {
            return Ok(false);
        }
        Ok(matches!(
            self.grid.get(position)?,
            Cell::Wall | Cell::Door | Cell::Stairs
        ))
    }

    /// Directions an enemy standing at `position` could step into.
    pub fn open_directions(&self, position: Position) -> Result<ArrayVec<Direction, 4>, GridError> {
        let mut open = ArrayVec::new();
        for direction in Direction::ALL {
            if !self.blocks_enemy(position.step(direction))? {
                open.push(direction);
            }
        }
        Ok(open)
    }

    /// Looks from `from` along each axis until a wall or door blocks the view.
    ///
    /// Returns the direction in which `target` is visible.
    pub fn line_of_sight(
        &self,
        from: Position,
        target: Position,
    ) -> Result<Option<Direction>, GridError> {
        for direction in Direction::ALL {
            let mut cursor = from.step(direction);
            while self.grid.contains(cursor) {
                if cursor == target {
                    return Ok(Some(direction));
                }
                if matches!(self.grid.get(cursor)?, Cell::Wall | Cell::Door | Cell::Stairs) {
                    break;
                }
                cursor = cursor.step(direction);
            }
        }
        Ok(None)
    }
}

/// Disjoint borrows handed to the engine for one turn.
pub(crate) struct LevelParts<'a> {
    pub terrain: Terrain<'a>,
    pub game_seed: u64,
    /// Number of the turn being resolved.
    pub turn: u64,
    pub hero: &'a mut Hero,
    pub guards: &'a mut [Guard],
    pub ogres: &'a mut [Ogre],
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;

    fn level(rows: &[&str]) -> Level {
        let layout = LevelLayout::new("test", rows.iter().map(|row| row.to_string()).collect())
            .with_movable_enemies(false);
        Level::from_layout(1, &layout, &GameConfig::default(), 0).unwrap()
    }

    #[test]
    fn status_priority_prefers_fatality() {
        let all = HeroFlags::FATALITY | HeroFlags::CAPTURED | HeroFlags::ESCAPED;
        assert_eq!(LevelStatus::from_flags(all), LevelStatus::Fatality);
        assert_eq!(
            LevelStatus::from_flags(HeroFlags::CAPTURED | HeroFlags::ESCAPED),
            LevelStatus::Captured
        );
        assert_eq!(
            LevelStatus::from_flags(HeroFlags::EXIT_OPENED),
            LevelStatus::Playing
        );
    }

    #[test]
    fn characters_follow_canonical_order() {
        let level = level(&["XXXXXX", "XH  GX", "X k GX", "XXIXXX"]);
        let ids: Vec<CharacterId> = level.characters().map(|c| c.id()).collect();
        assert_eq!(ids, vec![CharacterId(0), CharacterId(1), CharacterId(2)]);
        let reversed: Vec<CharacterId> = level.characters().rev().map(|c| c.id()).collect();
        assert_eq!(reversed, vec![CharacterId(2), CharacterId(1), CharacterId(0)]);
    }

    #[test]
    fn terrain_blocks_enemies_on_features() {
        let level = level(&["XXXXXX", "XH  GX", "X kI X", "XXIXXX"]);
        let terrain = level.terrain();
        assert!(terrain.blocks_enemy(Position::new(0, 0)).unwrap());
        assert!(terrain.blocks_enemy(Position::new(2, 2)).unwrap());
        assert!(terrain.blocks_enemy(Position::new(3, 2)).unwrap());
        assert!(terrain.blocks_enemy(Position::new(2, 3)).unwrap());
        assert!(terrain.blocks_enemy(Position::new(-1, 2)).unwrap());
        assert!(!terrain.blocks_enemy(Position::new(3, 1)).unwrap());

        assert!(!terrain.blocks_club(Position::new(2, 2)).unwrap());
        assert!(terrain.blocks_club(Position::new(2, 3)).unwrap());

        assert!(terrain.blocks_hero(Position::new(3, 2)).unwrap());
        assert!(!terrain.blocks_hero(Position::new(2, 3)).unwrap());
    }

    #[test]
    fn sight_stops_at_walls() {
        let level = level(&["XXXXXXX", "XH X GX", "X     X", "X k   X", "XXIXXXX"]);
        let terrain = level.terrain();
        let guard = Position::new(5, 1);
        assert_eq!(
            terrain.line_of_sight(guard, Position::new(5, 3)).unwrap(),
            Some(Direction::Down)
        );
        assert_eq!(terrain.line_of_sight(guard, Position::new(1, 1)).unwrap(), None);
    }

    #[test]
    fn redraw_restores_base_symbols() {
        let mut level = level(&["XXXXX", "XH GX", "X k X", "XXIXX"]);
        assert_eq!(level.to_string(), "XXXXX\nXH GX\nX k X\nXXIXX\n");

        level.hero.body_mut().move_to(Position::new(2, 2));
        level.redraw().unwrap();
        assert_eq!(level.to_string(), "XXXXX\nX  GX\nX H X\nXXIXX\n");

        level.hero.body_mut().move_to(Position::new(1, 2));
        level.open_exits();
        level.redraw().unwrap();
        assert_eq!(level.to_string(), "XXXXX\nX  GX\nXHk X\nXXSXX\n");
    }

    #[test]
    fn trapped_position_has_no_moves() {
        let level = level(&["XXXXX", "XHXGX", "XXXkX", "XXIXX"]);
        assert!(!level.is_move_possible(Position::new(3, 1)).unwrap());
        assert!(!level.is_move_possible(Position::new(1, 1)).unwrap());
    }
}
