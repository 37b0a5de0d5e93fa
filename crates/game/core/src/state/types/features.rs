use super::{Cell, Position};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum UnlockerKind {
    /// Opens the exits as soon as the hero touches it.
    #[default]
    Lever,
    /// Must be picked up and carried to an exit.
    Key,
}

/// Static lever/key feature.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Unlocker {
    pub position: Position,
    pub kind: UnlockerKind,
    /// A key leaves the map once the hero carries it.
    pub collected: bool,
}

impl Unlocker {
    pub fn new(position: Position, kind: UnlockerKind) -> Self {
        Self {
            position,
            kind,
            collected: false,
        }
    }

    pub fn is_lever(&self) -> bool {
        self.kind == UnlockerKind::Lever
    }

    /// True while the unlocker still occupies its cell.
    pub fn is_present(&self) -> bool {
        !self.collected
    }
}

/// Exit cell. Renders as a door until opened, then as stairs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Door {
    pub position: Position,
    pub open: bool,
}

impl Door {
    pub fn new(position: Position) -> Self {
        Self {
            position,
            open: false,
        }
    }

    pub fn symbol(&self) -> Cell {
        if self.open { Cell::Stairs } else { Cell::Door }
    }
}
