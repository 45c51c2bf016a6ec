//! Deadline queue ("FIFO") of in-progress games.
//!
//! A doubly linked list ordered by recency of activity: the head holds the
//! game idle the longest, the tail the one played most recently. Every
//! successful move sends its game to the tail, so games still being played
//! never reach the head and an expiry sweep only looks at abandoned games.
//!
//! Links are `GameId`s stored inside the records themselves, resolved
//! through the `GameStore`. The store is the arena and ids are the indices.

mod queue;

pub use queue::{
    append, check_integrity, move_to_tail, peek_head, remove, remove_head, walk_backward, walk_forward,
};
