use super::{Cell, Command, Position};

/// Base movable object: live position, rollback snapshot, display symbol.
///
/// `previous` is refreshed on every position change and is only ever used as
/// the rollback target for invalid moves.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Entity {
    position: Position,
    previous: Option<Position>,
    symbol: Cell,
    movable: bool,
}

impl Entity {
    pub fn new(position: Position, symbol: Cell) -> Self {
        Self {
            position,
            previous: None,
            symbol,
            movable: true,
        }
    }

    #[must_use]
    pub fn with_movable(mut self, movable: bool) -> Self {
        self.movable = movable;
        self
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Position before the last move, `None` before the first move.
    pub fn previous(&self) -> Option<Position> {
        self.previous
    }

    pub fn symbol(&self) -> Cell {
        self.symbol
    }

    pub fn set_symbol(&mut self, symbol: Cell) {
        self.symbol = symbol;
    }

    pub fn is_movable(&self) -> bool {
        self.movable
    }

    pub fn set_movable(&mut self, movable: bool) {
        self.movable = movable;
    }

    /// Records the current position as previous, then applies the command's delta.
    ///
    /// `Command::Wait` is a zero delta but still refreshes the snapshot.
    pub fn apply(&mut self, command: Command) {
        let target = match command.direction() {
            Some(direction) => self.position.step(direction),
            None => self.position,
        };
        self.move_to(target);
    }

    /// Records the current position as previous, then jumps to `target`.
    pub fn move_to(&mut self, target: Position) {
        self.previous = Some(self.position);
        self.position = target;
    }

    /// Restores the position from the previous snapshot.
    ///
    /// The snapshot itself is left untouched, so a second call is a no-op.
    pub fn revert_to_previous(&mut self) {
        if let Some(previous) = self.previous {
            self.position = previous;
        }
    }
}

/// Weapon bound to an owning character.
///
/// A carried weapon (the hero's) is invisible and follows its owner; a club
/// is drawn in its own cell next to its ogre.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Weapon {
    pub body: Entity,
    /// Set while the weapon rests over the unlocker cell.
    pub above_key: bool,
    visible: bool,
}

impl Weapon {
    /// A club drawn on the grid.
    pub fn club(position: Position) -> Self {
        Self {
            body: Entity::new(position, Cell::Club),
            above_key: false,
            visible: true,
        }
    }

    /// A weapon carried in hand, never drawn on its own.
    pub fn carried(position: Position) -> Self {
        Self {
            body: Entity::new(position, Cell::Club),
            above_key: false,
            visible: false,
        }
    }

    pub fn position(&self) -> Position {
        self.body.position()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// True when the weapon coincides with `target`.
    pub fn hits(&self, target: Position) -> bool {
        self.body.position() == target
    }

    /// Symbol reflecting whether the weapon overlays the lever.
    pub fn refresh_symbol(&mut self) {
        let symbol = if self.above_key {
            Cell::ClubOverLever
        } else {
            Cell::Club
        };
        self.body.set_symbol(symbol);
    }
}
