//! Rules engine for games played on the ledger.
//!
//! `RulesEngine` defines:
//! - The starting board and first mover
//! - How a single step changes the board (including capture chains)
//! - Win/loss detection
//!
//! The ledger calls into `RulesEngine` but never interprets board
//! geometry directly. `Checkers` is the implementation used by default.

pub mod engine;
pub mod checkers;

pub use engine::{Move, MoveError, MoveOutcome, RulesEngine};
pub use checkers::Checkers;
