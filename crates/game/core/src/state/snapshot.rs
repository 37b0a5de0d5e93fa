//! Level snapshots and state digests.
//!
//! A [`LevelSnapshot`] is the complete mutable state of a level in plain
//! public fields. With the `serde` feature it encodes to bincode for save
//! files; [`Level::digest`] hashes the same state for replay comparison.

use sha2::{Digest, Sha256};

use crate::error::{ErrorSeverity, GameError};

use super::{Door, Grid, Guard, Hero, Level, LevelError, LevelStatus, Ogre, Position, Unlocker};

/// Bumped whenever the snapshot layout changes.
pub const SNAPSHOT_VERSION: u16 = 1;

/// Owned copy of everything [`Level`] tracks.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelSnapshot {
    pub version: u16,
    pub index: u32,
    pub name: String,
    pub game_seed: u64,
    pub turn: u64,
    pub status: LevelStatus,
    /// Rendered grid rows.
    pub rows: Vec<String>,
    pub hero: Hero,
    pub guards: Vec<Guard>,
    pub ogres: Vec<Ogre>,
    pub doors: Vec<Door>,
    pub unlockers: Vec<Unlocker>,
    pub painted: Vec<Position>,
}

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("snapshot version {found} is not supported (expected {expected})")]
    UnsupportedVersion { found: u16, expected: u16 },

    #[error("snapshot grid is malformed: {0}")]
    Grid(#[from] LevelError),

    #[error("entity at {position} lies outside the snapshot grid")]
    OutOfBounds { position: Position },

    #[cfg(feature = "serde")]
    #[error("snapshot encoding failed: {0}")]
    Codec(#[from] bincode::Error),
}

impl GameError for SnapshotError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnsupportedVersion { .. } => "SNAPSHOT_UNSUPPORTED_VERSION",
            Self::Grid(_) => "SNAPSHOT_GRID",
            Self::OutOfBounds { .. } => "SNAPSHOT_OUT_OF_BOUNDS",
            #[cfg(feature = "serde")]
            Self::Codec(_) => "SNAPSHOT_CODEC",
        }
    }
}

#[cfg(feature = "serde")]
impl LevelSnapshot {
    pub fn encode(&self) -> Result<Vec<u8>, SnapshotError> {
        Ok(bincode::serialize(self)?)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, SnapshotError> {
        Ok(bincode::deserialize(bytes)?)
    }
}

impl Level {
    pub fn snapshot(&self) -> LevelSnapshot {
        LevelSnapshot {
            version: SNAPSHOT_VERSION,
            index: self.index,
            name: self.name.clone(),
            game_seed: self.game_seed,
            turn: self.turn,
            status: self.status,
            rows: self.grid.rows().collect(),
            hero: self.hero.clone(),
            guards: self.guards.clone(),
            ogres: self.ogres.clone(),
            doors: self.doors.clone(),
            unlockers: self.unlockers.clone(),
            painted: self.painted.clone(),
        }
    }

    /// Rebuilds a level from a snapshot.
    ///
    /// Only structural checks run here; the snapshot is trusted to come from
    /// [`Level::snapshot`].
    pub fn restore(snapshot: LevelSnapshot) -> Result<Self, SnapshotError> {
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                found: snapshot.version,
                expected: SNAPSHOT_VERSION,
            });
        }

        let grid = Grid::from_rows(&snapshot.rows)?;
        let positions = std::iter::once(snapshot.hero.position())
            .chain(snapshot.guards.iter().map(Guard::position))
            .chain(snapshot.ogres.iter().map(Ogre::position))
            .chain(snapshot.ogres.iter().map(|ogre| ogre.club.position()))
            .chain(snapshot.doors.iter().map(|door| door.position))
            .chain(snapshot.unlockers.iter().map(|unlocker| unlocker.position))
            .chain(snapshot.painted.iter().copied());
        for position in positions {
            if !grid.contains(position) {
                return Err(SnapshotError::OutOfBounds { position });
            }
        }

        Ok(Level {
            index: snapshot.index,
            name: snapshot.name,
            game_seed: snapshot.game_seed,
            turn: snapshot.turn,
            status: snapshot.status,
            grid,
            hero: snapshot.hero,
            guards: snapshot.guards,
            ogres: snapshot.ogres,
            doors: snapshot.doors,
            unlockers: snapshot.unlockers,
            painted: snapshot.painted,
        })
    }

    /// SHA-256 over the turn counter, status, rendered grid and entity state.
    ///
    /// Two levels driven by the same seed and commands hash identically.
    pub fn digest(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(self.index.to_le_bytes());
        hasher.update(self.game_seed.to_le_bytes());
        hasher.update(self.turn.to_le_bytes());
        hasher.update(self.status.as_ref().as_bytes());
        for row in self.grid.rows() {
            hasher.update(row.as_bytes());
            hasher.update([b'\n']);
        }

        hash_position(&mut hasher, self.hero.position());
        hasher.update([self.hero.flags().bits(), u8::from(self.hero.has_key())]);
        for guard in &self.guards {
            hash_position(&mut hasher, guard.position());
            hasher.update([u8::from(guard.is_asleep())]);
        }
        for ogre in &self.ogres {
            hash_position(&mut hasher, ogre.position());
            hash_position(&mut hasher, ogre.club.position());
            hasher.update([ogre.stun_count()]);
        }
        for door in &self.doors {
            hasher.update([u8::from(door.open)]);
        }
        for unlocker in &self.unlockers {
            hasher.update([u8::from(unlocker.collected)]);
        }

        hasher.finalize().into()
    }
}

fn hash_position(hasher: &mut Sha256, position: Position) {
    hasher.update(position.x.to_le_bytes());
    hasher.update(position.y.to_le_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::state::LevelLayout;

    fn level() -> Level {
        let rows = ["XXXXX", "XH GX", "X k X", "XXIXX"]
            .iter()
            .map(|row| row.to_string())
            .collect();
        Level::from_layout(1, &LevelLayout::new("cell", rows), &GameConfig::default(), 11).unwrap()
    }

    #[test]
    fn snapshot_restores_equal_level() {
        let level = level();
        let restored = Level::restore(level.snapshot()).unwrap();
        assert_eq!(restored, level);
        assert_eq!(restored.digest(), level.digest());
    }

    #[test]
    fn rejects_other_versions() {
        let mut snapshot = level().snapshot();
        snapshot.version = SNAPSHOT_VERSION + 1;
        assert!(matches!(
            Level::restore(snapshot),
            Err(SnapshotError::UnsupportedVersion { .. })
        ));
    }

    #[test]
    fn rejects_entities_outside_grid() {
        let mut snapshot = level().snapshot();
        snapshot.painted.push(Position::new(9, 9));
        assert!(matches!(
            Level::restore(snapshot),
            Err(SnapshotError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn digest_tracks_state() {
        let level = level();
        let digest = hex::encode(level.digest());
        assert_eq!(digest.len(), 64);

        let mut moved = level.clone();
        moved.hero.body_mut().move_to(Position::new(2, 1));
        assert_ne!(moved.digest(), level.digest());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn snapshot_encodes_with_bincode() {
        let snapshot = level().snapshot();
        let bytes = snapshot.encode().unwrap();
        assert_eq!(LevelSnapshot::decode(&bytes).unwrap(), snapshot);
    }
}
