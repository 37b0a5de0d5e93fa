use std::fmt;

use crate::error::{ErrorSeverity, GameError};
use crate::state::LevelError;

use super::Position;

/// Width and height of a level grid, in cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapDimensions {
    pub width: u32,
    pub height: u32,
}

impl MapDimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && position.x < self.width as i32
            && position.y < self.height as i32
    }

    /// True when `position` lies on the outermost ring of cells.
    pub fn is_border(&self, position: Position) -> bool {
        self.contains(position)
            && (position.x == 0
                || position.y == 0
                || position.x == self.width as i32 - 1
                || position.y == self.height as i32 - 1)
    }
}

impl fmt::Display for MapDimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// The fixed symbol alphabet a grid cell can hold.
///
/// Each cell holds exactly one meaning; a club resting on the lever is the
/// dedicated [`Cell::ClubOverLever`] symbol.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Cell {
    #[default]
    Empty,
    Wall,
    Door,
    Hero,
    ArmedHero,
    KeyHero,
    Guard,
    SleepingGuard,
    Lever,
    Stairs,
    Ogre,
    StunnedOgre,
    Club,
    ClubOverLever,
}

impl Cell {
    pub const fn symbol(self) -> char {
        match self {
            Cell::Empty => ' ',
            Cell::Wall => 'X',
            Cell::Door => 'I',
            Cell::Hero => 'H',
            Cell::ArmedHero => 'A',
            Cell::KeyHero => 'K',
            Cell::Guard => 'G',
            Cell::SleepingGuard => 'g',
            Cell::Lever => 'k',
            Cell::Stairs => 'S',
            Cell::Ogre => 'O',
            Cell::StunnedOgre => '8',
            Cell::Club => '*',
            Cell::ClubOverLever => '$',
        }
    }

    pub const fn from_symbol(symbol: char) -> Option<Self> {
        let cell = match symbol {
            ' ' => Cell::Empty,
            'X' => Cell::Wall,
            'I' => Cell::Door,
            'H' => Cell::Hero,
            'A' => Cell::ArmedHero,
            'K' => Cell::KeyHero,
            'G' => Cell::Guard,
            'g' => Cell::SleepingGuard,
            'k' => Cell::Lever,
            'S' => Cell::Stairs,
            'O' => Cell::Ogre,
            '8' => Cell::StunnedOgre,
            '*' => Cell::Club,
            '$' => Cell::ClubOverLever,
            _ => return None,
        };
        Some(cell)
    }

    pub const fn is_hero(self) -> bool {
        matches!(self, Cell::Hero | Cell::ArmedHero | Cell::KeyHero)
    }

    pub const fn is_guard(self) -> bool {
        matches!(self, Cell::Guard | Cell::SleepingGuard)
    }

    pub const fn is_ogre(self) -> bool {
        matches!(self, Cell::Ogre | Cell::StunnedOgre)
    }

    pub const fn is_club(self) -> bool {
        matches!(self, Cell::Club | Cell::ClubOverLever)
    }
}

/// Cell access outside the grid extents.
///
/// Normal play never produces this; it signals a defect in AI or collision
/// code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GridError {
    #[error("position {position} is out of bounds (grid size: {dimensions})")]
    OutOfBounds {
        position: Position,
        dimensions: MapDimensions,
    },
}

impl GameError for GridError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::OutOfBounds { .. } => "GRID_OUT_OF_BOUNDS",
        }
    }
}

/// Fixed-size 2D array of cell symbols, stored row-major.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid {
    dimensions: MapDimensions,
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates a grid filled with [`Cell::Empty`].
    pub fn new(dimensions: MapDimensions) -> Self {
        let len = dimensions.width as usize * dimensions.height as usize;
        Self {
            dimensions,
            cells: vec![Cell::Empty; len],
        }
    }

    /// Creates an empty grid surrounded by exactly one ring of walls.
    pub fn bordered(dimensions: MapDimensions) -> Self {
        let mut grid = Self::new(dimensions);
        for index in 0..grid.cells.len() {
            let position = grid.position_of(index);
            if dimensions.is_border(position) {
                grid.cells[index] = Cell::Wall;
            }
        }
        grid
    }

    /// Parses a row-major character matrix.
    ///
    /// Rows must be non-empty, equally long, and use only the cell alphabet.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, LevelError> {
        let height = rows.len();
        let width = rows.first().map(|row| row.as_ref().chars().count()).unwrap_or(0);
        if height == 0 || width == 0 {
            return Err(LevelError::EmptyLayout);
        }

        let mut cells = Vec::with_capacity(width * height);
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            let len = row.chars().count();
            if len != width {
                return Err(LevelError::RaggedRow {
                    row: y,
                    expected: width,
                    found: len,
                });
            }
            for (x, symbol) in row.chars().enumerate() {
                let cell = Cell::from_symbol(symbol).ok_or(LevelError::UnknownSymbol {
                    symbol,
                    position: Position::new(x as i32, y as i32),
                })?;
                cells.push(cell);
            }
        }

        Ok(Self {
            dimensions: MapDimensions::new(width as u32, height as u32),
            cells,
        })
    }

    pub fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }

    pub fn width(&self) -> u32 {
        self.dimensions.width
    }

    pub fn height(&self) -> u32 {
        self.dimensions.height
    }

    pub fn contains(&self, position: Position) -> bool {
        self.dimensions.contains(position)
    }

    pub fn get(&self, position: Position) -> Result<Cell, GridError> {
        let index = self.index_of(position)?;
        Ok(self.cells[index])
    }

    pub fn set(&mut self, position: Position, cell: Cell) -> Result<(), GridError> {
        let index = self.index_of(position)?;
        self.cells[index] = cell;
        Ok(())
    }

    pub fn is_wall(&self, position: Position) -> Result<bool, GridError> {
        Ok(self.get(position)? == Cell::Wall)
    }

    pub fn is_door(&self, position: Position) -> Result<bool, GridError> {
        Ok(self.get(position)? == Cell::Door)
    }

    /// Iterates over every position holding `cell`, row by row.
    pub fn positions_of(&self, cell: Cell) -> impl Iterator<Item = Position> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(move |(_, candidate)| **candidate == cell)
            .map(|(index, _)| self.position_of(index))
    }

    pub fn contains_symbol(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }

    /// Renders each row as a string, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = String> + '_ {
        self.cells
            .chunks(self.dimensions.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect())
    }

    fn index_of(&self, position: Position) -> Result<usize, GridError> {
        if !self.dimensions.contains(position) {
            return Err(GridError::OutOfBounds {
                position,
                dimensions: self.dimensions,
            });
        }
        Ok(position.y as usize * self.dimensions.width as usize + position.x as usize)
    }

    fn position_of(&self, index: usize) -> Position {
        let width = self.dimensions.width as usize;
        Position::new((index % width) as i32, (index / width) as i32)
    }
}

impl fmt::Display for Grid {
    /// One row per line, each terminated by `\n`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            writeln!(f, "{row}")?;
        }
        Ok(())
    }
}
