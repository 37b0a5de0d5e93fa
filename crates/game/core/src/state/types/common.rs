use std::fmt;

/// Stable identifier for a character within a level.
///
/// Identifiers follow the canonical character order: the hero first, then
/// guards, then ogres. The order doubles as the RNG stream selector and the
/// draw order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterId(pub u32);

impl CharacterId {
    /// Reserved identifier for the player-controlled hero.
    pub const HERO: Self = Self(0);

    /// Returns true if this identifier represents the hero.
    #[inline]
    pub const fn is_hero(self) -> bool {
        self.0 == Self::HERO.0
    }
}

impl Default for CharacterId {
    fn default() -> Self {
        Self::HERO
    }
}

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Discrete grid position expressed in cell coordinates.
///
/// `x` is the column and `y` the row; rows grow downwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Position one step away in `direction`.
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self::new(self.x + dx, self.y + dy)
    }

    /// Manhattan distance `|Δx| + |Δy|`.
    pub fn manhattan(self, other: Position) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Draw order used by the uniform random policies.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub const fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub const fn clockwise(self) -> Self {
        match self {
            Direction::Up => Direction::Right,
            Direction::Right => Direction::Down,
            Direction::Down => Direction::Left,
            Direction::Left => Direction::Up,
        }
    }

    /// Canonical lowercase command character.
    pub const fn as_char(self) -> char {
        match self {
            Direction::Up => 'u',
            Direction::Down => 'd',
            Direction::Left => 'l',
            Direction::Right => 'r',
        }
    }
}

/// One turn instruction for a movable entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Command {
    Move(Direction),
    /// The `E` command: stay in place for this turn.
    Wait,
}

impl Command {
    pub const fn direction(self) -> Option<Direction> {
        match self {
            Command::Move(direction) => Some(direction),
            Command::Wait => None,
        }
    }

    pub const fn as_char(self) -> char {
        match self {
            Command::Move(direction) => direction.as_char(),
            Command::Wait => 'E',
        }
    }

    /// Parses a whole route string such as `"ldddd"`, skipping whitespace.
    pub fn parse_route(route: &str) -> Result<Vec<Direction>, InvalidCommand> {
        route
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| match Command::try_from(c)? {
                Command::Move(direction) => Ok(direction),
                Command::Wait => Err(InvalidCommand(c)),
            })
            .collect()
    }
}

impl From<Direction> for Command {
    fn from(direction: Direction) -> Self {
        Command::Move(direction)
    }
}

impl TryFrom<char> for Command {
    type Error = InvalidCommand;

    fn try_from(input: char) -> Result<Self, Self::Error> {
        match input {
            'u' | 'U' => Ok(Command::Move(Direction::Up)),
            'd' | 'D' => Ok(Command::Move(Direction::Down)),
            'l' | 'L' => Ok(Command::Move(Direction::Left)),
            'r' | 'R' => Ok(Command::Move(Direction::Right)),
            'E' => Ok(Command::Wait),
            other => Err(InvalidCommand(other)),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Input character outside the turn command alphabet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[error("unrecognized command {0:?} (expected one of u, d, l, r, E)")]
pub struct InvalidCommand(pub char);
