//! Core types: sides, player addresses, game ids, configuration, clock.
//!
//! These are the leaf building blocks shared by the board, the rules engine,
//! the deadline queue and the ledger.

pub mod id;
pub mod player;
pub mod config;
pub mod clock;

pub use id::{GameId, ParseGameIdError, NO_LINK};
pub use player::{AddressValidator, PlayerAddress, PrefixValidator, Side};
pub use config::CheckersConfig;
pub use clock::{BlockTime, Clock, FixedClock, SystemClock};
