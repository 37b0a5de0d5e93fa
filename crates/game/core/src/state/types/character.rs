//! Character variants sharing the [`Entity`] base.
//!
//! The closed set {Hero, Guard, Ogre} is modelled as three concrete structs
//! plus [`CharacterRef`] for code that walks all characters in canonical
//! order. Per-variant behaviour lives in `crate::ai` and `crate::engine`.

use bitflags::bitflags;

use super::{Cell, CharacterId, Direction, Entity, Position, Weapon};

/// State shared by every character variant.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Character {
    pub id: CharacterId,
    pub body: Entity,
    /// Presentation hint only; the simulation never reads it.
    pub show_display: bool,
}

impl Character {
    pub fn new(id: CharacterId, position: Position, symbol: Cell) -> Self {
        Self {
            id,
            body: Entity::new(position, symbol),
            show_display: true,
        }
    }

    pub fn position(&self) -> Position {
        self.body.position()
    }
}

/// Capture test shared by guards and ogres: adjacent (Manhattan ≤ 1) to an
/// unarmed hero.
pub fn captures(enemy: Position, hero: &Hero) -> bool {
    !hero.is_armed() && enemy.manhattan(hero.position()) <= 1
}

bitflags! {
    /// Hero flags. The three `*_COLLIDING` bits are transient and only live
    /// during the hero's collision pass; the rest persist for the level.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct HeroFlags: u8 {
        const WALL_COLLIDING   = 1 << 0;
        const OBJECT_COLLIDING = 1 << 1;
        const EXIT_COLLIDING   = 1 << 2;
        const EXIT_OPENED      = 1 << 3;
        const CAPTURED         = 1 << 4;
        const ESCAPED          = 1 << 5;
        const FATALITY         = 1 << 6;

        const TRANSIENT = Self::WALL_COLLIDING.bits()
            | Self::OBJECT_COLLIDING.bits()
            | Self::EXIT_COLLIDING.bits();
    }
}

/// The player-controlled character.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hero {
    pub character: Character,
    weapon: Option<Weapon>,
    has_key: bool,
    flags: HeroFlags,
}

impl Hero {
    pub fn new(position: Position) -> Self {
        Self {
            character: Character::new(CharacterId::HERO, position, Cell::Hero),
            weapon: None,
            has_key: false,
            flags: HeroFlags::empty(),
        }
    }

    /// Hero carrying a weapon in hand; renders as the armed-hero symbol.
    pub fn armed(position: Position) -> Self {
        let mut hero = Self::new(position);
        hero.weapon = Some(Weapon::carried(position));
        hero.refresh_symbol();
        hero
    }

    #[must_use]
    pub fn with_key(mut self) -> Self {
        self.has_key = true;
        self.refresh_symbol();
        self
    }

    pub fn position(&self) -> Position {
        self.character.position()
    }

    pub fn body(&self) -> &Entity {
        &self.character.body
    }

    pub fn body_mut(&mut self) -> &mut Entity {
        &mut self.character.body
    }

    pub fn weapon(&self) -> Option<&Weapon> {
        self.weapon.as_ref()
    }

    pub fn is_armed(&self) -> bool {
        self.weapon.is_some()
    }

    pub fn has_key(&self) -> bool {
        self.has_key
    }

    /// Picks up the key; the hero renders as the key-hero from now on.
    pub fn take_key(&mut self) {
        self.has_key = true;
        self.refresh_symbol();
    }

    pub fn flags(&self) -> HeroFlags {
        self.flags
    }

    pub fn insert_flags(&mut self, flags: HeroFlags) {
        self.flags.insert(flags);
    }

    pub fn clear_transient(&mut self) {
        self.flags.remove(HeroFlags::TRANSIENT);
    }

    pub fn escaped(&self) -> bool {
        self.flags.contains(HeroFlags::ESCAPED)
    }

    pub fn captured(&self) -> bool {
        self.flags.contains(HeroFlags::CAPTURED)
    }

    pub fn fatality(&self) -> bool {
        self.flags.contains(HeroFlags::FATALITY)
    }

    pub fn exit_opened(&self) -> bool {
        self.flags.contains(HeroFlags::EXIT_OPENED)
    }

    /// Reverts the last move and drags the carried weapon along.
    pub fn revert_to_previous(&mut self) {
        self.character.body.revert_to_previous();
        self.sync_weapon();
    }

    /// Keeps the carried weapon on the hero's cell.
    pub fn sync_weapon(&mut self) {
        let position = self.position();
        if let Some(weapon) = self.weapon.as_mut() {
            if weapon.position() != position {
                weapon.body.move_to(position);
            }
        }
    }

    fn refresh_symbol(&mut self) {
        let symbol = if self.has_key {
            Cell::KeyHero
        } else if self.weapon.is_some() {
            Cell::ArmedHero
        } else {
            Cell::Hero
        };
        self.character.body.set_symbol(symbol);
    }
}

/// Guard movement personalities.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum GuardPersonality {
    /// Uniform random walk.
    #[default]
    Rookie,
    /// Patrols a route and chases the hero on sight.
    Suspicious,
    /// Correlated random walk that occasionally dozes off.
    Drunken,
}

/// Per-personality policy state.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GuardBehavior {
    Rookie,
    Suspicious {
        /// Patrol steps, replayed cyclically. Empty means wall-following.
        route: Vec<Direction>,
        cursor: usize,
        /// Heading used for wall-following when `route` is empty.
        heading: Direction,
    },
    Drunken {
        /// Direction of the last step taken, if any.
        heading: Option<Direction>,
        /// Remaining turns asleep.
        asleep_for: u8,
    },
}

impl GuardBehavior {
    pub fn for_personality(personality: GuardPersonality, route: Vec<Direction>) -> Self {
        match personality {
            GuardPersonality::Rookie => GuardBehavior::Rookie,
            GuardPersonality::Suspicious => GuardBehavior::Suspicious {
                route,
                cursor: 0,
                heading: Direction::Left,
            },
            GuardPersonality::Drunken => GuardBehavior::Drunken {
                heading: None,
                asleep_for: 0,
            },
        }
    }

    pub fn personality(&self) -> GuardPersonality {
        match self {
            GuardBehavior::Rookie => GuardPersonality::Rookie,
            GuardBehavior::Suspicious { .. } => GuardPersonality::Suspicious,
            GuardBehavior::Drunken { .. } => GuardPersonality::Drunken,
        }
    }
}

/// Capture-only enemy. Guards never carry a weapon.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Guard {
    pub character: Character,
    pub behavior: GuardBehavior,
}

impl Guard {
    pub fn new(id: CharacterId, position: Position, behavior: GuardBehavior) -> Self {
        Self {
            character: Character::new(id, position, Cell::Guard),
            behavior,
        }
    }

    pub fn id(&self) -> CharacterId {
        self.character.id
    }

    pub fn position(&self) -> Position {
        self.character.position()
    }

    pub fn personality(&self) -> GuardPersonality {
        self.behavior.personality()
    }

    pub fn is_asleep(&self) -> bool {
        matches!(self.behavior, GuardBehavior::Drunken { asleep_for, .. } if asleep_for > 0)
    }

    pub fn refresh_symbol(&mut self) {
        let symbol = if self.is_asleep() {
            Cell::SleepingGuard
        } else {
            Cell::Guard
        };
        self.character.body.set_symbol(symbol);
    }
}

/// Ogre stun lifecycle: `Active → Stunned(n) → … → Active`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StunState {
    #[default]
    Active,
    Stunned { turns_left: u8 },
}

/// Roaming enemy that always owns a club.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ogre {
    pub character: Character,
    pub club: Weapon,
    stun: StunState,
}

impl Ogre {
    pub fn new(id: CharacterId, position: Position, club_position: Position) -> Self {
        Self {
            character: Character::new(id, position, Cell::Ogre),
            club: Weapon::club(club_position),
            stun: StunState::Active,
        }
    }

    pub fn id(&self) -> CharacterId {
        self.character.id
    }

    pub fn position(&self) -> Position {
        self.character.position()
    }

    pub fn stun_state(&self) -> StunState {
        self.stun
    }

    pub fn is_stunned(&self) -> bool {
        matches!(self.stun, StunState::Stunned { .. })
    }

    /// Remaining stunned turns, zero when active.
    pub fn stun_count(&self) -> u8 {
        match self.stun {
            StunState::Active => 0,
            StunState::Stunned { turns_left } => turns_left,
        }
    }

    /// Enters (or restarts) the stunned state.
    pub fn stun(&mut self, turns: u8) {
        self.stun = if turns == 0 {
            StunState::Active
        } else {
            StunState::Stunned { turns_left: turns }
        };
        self.refresh_symbol();
    }

    /// Counts down one stunned turn. Returns true when the ogre recovers.
    pub fn tick_stun(&mut self) -> bool {
        let recovered = match self.stun {
            StunState::Active => false,
            StunState::Stunned { turns_left } if turns_left <= 1 => {
                self.stun = StunState::Active;
                true
            }
            StunState::Stunned { turns_left } => {
                self.stun = StunState::Stunned {
                    turns_left: turns_left - 1,
                };
                false
            }
        };
        self.refresh_symbol();
        recovered
    }

    pub fn refresh_symbol(&mut self) {
        let symbol = if self.is_stunned() {
            Cell::StunnedOgre
        } else {
            Cell::Ogre
        };
        self.character.body.set_symbol(symbol);
        self.club.refresh_symbol();
    }
}

/// Borrowed view over any character, in canonical order.
#[derive(Clone, Copy, Debug)]
pub enum CharacterRef<'a> {
    Hero(&'a Hero),
    Guard(&'a Guard),
    Ogre(&'a Ogre),
}

impl<'a> CharacterRef<'a> {
    pub fn id(&self) -> CharacterId {
        self.character().id
    }

    pub fn character(&self) -> &'a Character {
        match self {
            CharacterRef::Hero(hero) => &hero.character,
            CharacterRef::Guard(guard) => &guard.character,
            CharacterRef::Ogre(ogre) => &ogre.character,
        }
    }

    pub fn position(&self) -> Position {
        self.character().position()
    }

    pub fn symbol(&self) -> Cell {
        self.character().body.symbol()
    }

    /// Weapon drawn in its own cell, if the character has one.
    pub fn visible_weapon(&self) -> Option<&'a Weapon> {
        match self {
            CharacterRef::Hero(hero) => hero.weapon().filter(|weapon| weapon.is_visible()),
            CharacterRef::Guard(_) => None,
            CharacterRef::Ogre(ogre) => Some(&ogre.club).filter(|club| club.is_visible()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn hero_symbol_reflects_equipment() {
        let hero = Hero::new(Position::new(1, 1));
        assert_eq!(hero.body().symbol(), Cell::Hero);

        let armed = Hero::armed(Position::new(1, 1));
        assert_eq!(armed.body().symbol(), Cell::ArmedHero);

        let mut keyed = Hero::armed(Position::new(1, 1));
        keyed.take_key();
        assert_eq!(keyed.body().symbol(), Cell::KeyHero);
        assert!(keyed.is_armed());
    }

    #[test]
    fn armed_hero_is_never_captured() {
        let unarmed = Hero::new(Position::new(2, 2));
        let armed = Hero::armed(Position::new(2, 2));
        let adjacent = Position::new(2, 3);

        assert!(captures(adjacent, &unarmed));
        assert!(captures(Position::new(2, 2), &unarmed));
        assert!(!captures(Position::new(3, 3), &unarmed));
        assert!(!captures(adjacent, &armed));
    }

    #[test]
    fn transient_flags_are_cleared_separately() {
        let mut hero = Hero::new(Position::ORIGIN);
        hero.insert_flags(HeroFlags::WALL_COLLIDING | HeroFlags::EXIT_OPENED);
        hero.clear_transient();
        assert_eq!(hero.flags(), HeroFlags::EXIT_OPENED);
    }

    #[test]
    fn carried_weapon_follows_hero() {
        let mut hero = Hero::armed(Position::new(1, 1));
        hero.body_mut().move_to(Position::new(2, 1));
        hero.sync_weapon();
        assert_eq!(hero.weapon().map(Weapon::position), Some(Position::new(2, 1)));

        hero.revert_to_previous();
        assert_eq!(hero.weapon().map(Weapon::position), Some(Position::new(1, 1)));
    }

    #[test]
    fn stun_counts_down_to_active() {
        let mut ogre = Ogre::new(CharacterId(1), Position::new(4, 1), Position::new(3, 1));
        ogre.stun(2);
        assert_eq!(ogre.stun_state(), StunState::Stunned { turns_left: 2 });
        assert_eq!(ogre.character.body.symbol(), Cell::StunnedOgre);

        assert!(!ogre.tick_stun());
        assert_eq!(ogre.stun_count(), 1);
        assert!(ogre.tick_stun());
        assert_eq!(ogre.stun_state(), StunState::Active);
        assert_eq!(ogre.character.body.symbol(), Cell::Ogre);

        assert!(!ogre.tick_stun());
    }

    #[test]
    fn personality_parses_case_insensitively() {
        assert_eq!(
            GuardPersonality::from_str("Suspicious"),
            Ok(GuardPersonality::Suspicious)
        );
        assert_eq!(
            GuardPersonality::from_str("drunken"),
            Ok(GuardPersonality::Drunken)
        );
        assert!(GuardPersonality::from_str("sleepy").is_err());
        assert_eq!(GuardPersonality::Rookie.to_string(), "rookie");
    }

    #[test]
    fn sleeping_guard_renders_lowercase() {
        let mut guard = Guard::new(
            CharacterId(1),
            Position::new(3, 3),
            GuardBehavior::Drunken {
                heading: None,
                asleep_for: 2,
            },
        );
        guard.refresh_symbol();
        assert_eq!(guard.character.body.symbol(), Cell::SleepingGuard);
        assert_eq!(guard.personality(), GuardPersonality::Drunken);
    }
}
