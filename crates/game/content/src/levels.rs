//! Built-in campaign.
//!
//! Two levels ship with the game: a guarded dungeon opened by a lever, and an
//! ogre keep opened by a key the hero has to carry to the door.

use game_core::{Command, Direction, LevelLayout, UnlockerKind};

/// Names accepted by [`builtin`], in campaign order.
pub const BUILTIN_LEVELS: [&str; 2] = ["dungeon", "keep"];

const DUNGEON_ROWS: [&str; 10] = [
    "XXXXXXXXXX",
    "XH  I X GX",
    "XXX XXX  X",
    "X I I X  X",
    "XXX XXX  X",
    "I        X",
    "I        X",
    "XXX XXXX X",
    "X I I Xk X",
    "XXXXXXXXXX",
];

/// Patrol walked by the dungeon guard, starting from its post.
pub const DUNGEON_PATROL: &str = "ldddd llllll d rrrrrrr uuuuu";

const KEEP_ROWS: [&str; 10] = [
    "XXXXXXXXXX",
    "I  *O   kX",
    "X        X",
    "X        X",
    "X        X",
    "X        X",
    "X        X",
    "X        X",
    "XA       X",
    "XXXXXXXXXX",
];

fn rows(rows: &[&str]) -> Vec<String> {
    rows.iter().map(|row| row.to_string()).collect()
}

fn patrol() -> Vec<Direction> {
    // The route is a compile-time constant in the command alphabet.
    Command::parse_route(DUNGEON_PATROL).unwrap_or_default()
}

/// Level 1: one guard, two exits on the west wall, lever in the south-east room.
pub fn dungeon() -> LevelLayout {
    LevelLayout::new("dungeon", rows(&DUNGEON_ROWS))
        .with_unlocker(UnlockerKind::Lever)
        .with_patrol(patrol())
}

/// Level 2: an armed hero, a key, and as many ogres as configured.
pub fn keep() -> LevelLayout {
    LevelLayout::new("keep", rows(&KEEP_ROWS))
        .with_unlocker(UnlockerKind::Key)
        .with_replicated_ogres(true)
}

/// Looks up a built-in level by name.
pub fn builtin(name: &str) -> Option<LevelLayout> {
    match name {
        "dungeon" => Some(dungeon()),
        "keep" => Some(keep()),
        _ => None,
    }
}

/// Every built-in level in play order.
pub fn builtin_campaign() -> Vec<LevelLayout> {
    vec![dungeon(), keep()]
}
