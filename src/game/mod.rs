//! Game records and the ledger that drives them.
//!
//! - `record`: persisted per-game state and the queue anchor
//! - `ledger`: create, play, and expire games atomically
//! - `genesis`: export and validated import of the whole ledger

mod genesis;
mod ledger;
mod record;

pub use genesis::Genesis;
pub use ledger::{Ledger, MoveCheck, MoveReport};
pub use record::{GameRecord, GameStatus, QueueAnchor};
