//! In-memory game store.
//!
//! Backed by a persistent `im::OrdMap`, so cloning the whole store is O(1).
//! Hosts use that to keep per-block snapshots or to replay from a fork.

use im::OrdMap;
use serde::{Deserialize, Serialize};

use super::GameStore;
use crate::core::GameId;
use crate::error::CheckersError;
use crate::game::{GameRecord, QueueAnchor};

/// In-memory store keyed by `GameId`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryStore {
    anchor: QueueAnchor,
    games: OrdMap<GameId, GameRecord>,
}

/// Wire form of a snapshot.
#[derive(Serialize, Deserialize)]
struct Snapshot {
    anchor: QueueAnchor,
    games: Vec<GameRecord>,
}

impl MemoryStore {
    /// Empty store with a fresh anchor.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored games.
    #[must_use]
    pub fn len(&self) -> usize {
        self.games.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    /// Encode the whole store with bincode.
    pub fn snapshot(&self) -> Result<Vec<u8>, CheckersError> {
        let snapshot = Snapshot {
            anchor: self.anchor,
            games: self.games.values().cloned().collect(),
        };
        Ok(bincode::serialize(&snapshot)?)
    }

    /// Rebuild a store from [`MemoryStore::snapshot`] output.
    pub fn restore(bytes: &[u8]) -> Result<Self, CheckersError> {
        let snapshot: Snapshot = bincode::deserialize(bytes)?;
        Ok(Self {
            anchor: snapshot.anchor,
            games: snapshot.games.into_iter().map(|g| (g.id, g)).collect(),
        })
    }
}

impl GameStore for MemoryStore {
    fn get(&self, id: GameId) -> Option<GameRecord> {
        self.games.get(&id).cloned()
    }

    fn set(&mut self, record: GameRecord) {
        self.games.insert(record.id, record);
    }

    fn anchor(&self) -> QueueAnchor {
        self.anchor
    }

    fn set_anchor(&mut self, anchor: QueueAnchor) {
        self.anchor = anchor;
    }

    fn list_all(&self) -> Vec<GameRecord> {
        self.games.values().cloned().collect()
    }

    fn contains(&self, id: GameId) -> bool {
        self.games.contains_key(&id)
    }
}
