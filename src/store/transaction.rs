//! Staged writes over a store.
//!
//! A ledger operation reads and writes through a `Transaction`. Writes land
//! in an overlay and reach the underlying store only on `commit`. Dropping
//! the transaction (for example on an early `?` return) discards them, so a
//! failed operation leaves the store exactly as it was.

use rustc_hash::FxHashMap;

use super::GameStore;
use crate::core::GameId;
use crate::game::{GameRecord, QueueAnchor};

/// Overlay of pending writes on top of a store.
pub struct Transaction<'a, S: GameStore + ?Sized> {
    inner: &'a mut S,
    games: FxHashMap<GameId, GameRecord>,
    anchor: Option<QueueAnchor>,
}

impl<'a, S: GameStore + ?Sized> Transaction<'a, S> {
    #[must_use]
    pub fn new(inner: &'a mut S) -> Self {
        Self {
            inner,
            games: FxHashMap::default(),
            anchor: None,
        }
    }

    /// Number of records with pending writes.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.games.len()
    }

    /// Apply every staged write to the underlying store.
    ///
    /// Records are written in id order so commits are reproducible.
    pub fn commit(self) {
        let mut games: Vec<GameRecord> = self.games.into_values().collect();
        games.sort_by_key(|g| g.id);
        for game in games {
            self.inner.set(game);
        }
        if let Some(anchor) = self.anchor {
            self.inner.set_anchor(anchor);
        }
    }
}

impl<'a, S: GameStore + ?Sized> GameStore for Transaction<'a, S> {
    fn get(&self, id: GameId) -> Option<GameRecord> {
        self.games.get(&id).cloned().or_else(|| self.inner.get(id))
    }

    fn set(&mut self, record: GameRecord) {
        self.games.insert(record.id, record);
    }

    fn anchor(&self) -> QueueAnchor {
        self.anchor.unwrap_or_else(|| self.inner.anchor())
    }

    fn set_anchor(&mut self, anchor: QueueAnchor) {
        self.anchor = Some(anchor);
    }

    fn list_all(&self) -> Vec<GameRecord> {
        let mut all: Vec<GameRecord> = self
            .inner
            .list_all()
            .into_iter()
            .filter(|g| !self.games.contains_key(&g.id))
            .chain(self.games.values().cloned())
            .collect();
        all.sort_by_key(|g| g.id);
        all
    }

    fn contains(&self, id: GameId) -> bool {
        self.games.contains_key(&id) || self.inner.contains(id)
    }
}
