//! Key-value persistence for game records.
//!
//! The ledger only ever reaches records through their `GameId`; there are
//! no pointers between records. Queue links are ids resolved through the
//! store, which acts as the arena of an intrusive linked list.
//!
//! - `GameStore`: the storage contract a host implements
//! - `MemoryStore`: in-memory store with O(1) snapshots
//! - `Transaction`: staged writes applied all at once on commit

mod memory;
mod transaction;

pub use memory::MemoryStore;
pub use transaction::Transaction;

use crate::core::GameId;
use crate::game::{GameRecord, QueueAnchor};

/// Storage contract.
///
/// Calls are synchronous and never interleave: the host runs one ledger
/// operation at a time to completion.
pub trait GameStore {
    /// Load a record by id.
    fn get(&self, id: GameId) -> Option<GameRecord>;

    /// Insert or overwrite a record under its own id.
    fn set(&mut self, record: GameRecord);

    /// Load the singleton anchor (default on a fresh store).
    fn anchor(&self) -> QueueAnchor;

    fn set_anchor(&mut self, anchor: QueueAnchor);

    /// Every record, ordered by id.
    fn list_all(&self) -> Vec<GameRecord>;

    /// True if a record exists under `id`.
    fn contains(&self, id: GameId) -> bool {
        self.get(id).is_some()
    }
}
