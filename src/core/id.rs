//! Game identification.
//!
//! Every game gets a `GameId` allocated from the monotonic counter held in the
//! `QueueAnchor`. Ids are never reused, so a finished game stays addressable.
//!
//! ## Persisted Form
//!
//! Ids are persisted as decimal strings (`"1"`, `"2"`, ...). Queue links that
//! point nowhere are persisted as the reserved sentinel [`NO_LINK`] (`"-1"`)
//! and surface in Rust as `None`.
//!
//! ```
//! use rust_checkers::core::GameId;
//!
//! let id: GameId = "7".parse().unwrap();
//! assert_eq!(id, GameId::new(7));
//! assert_eq!(id.checked_next(), Some(GameId::new(8)));
//! assert_eq!(id.to_string(), "7");
//! ```

use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Reserved key meaning "no neighbour" in persisted queue links.
pub const NO_LINK: &str = "-1";

/// Unique, monotonically assigned game identifier.
///
/// Ordering follows allocation order, so maps keyed by `GameId` list games
/// in the order they were created.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GameId(pub u64);

impl GameId {
    /// The id handed to the first game created on a fresh ledger.
    pub const FIRST: GameId = GameId(1);

    /// Create a new game ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// The id allocated after this one, `None` once the counter is exhausted.
    #[must_use]
    pub const fn checked_next(self) -> Option<Self> {
        match self.0.checked_add(1) {
            Some(next) => Some(Self(next)),
            None => None,
        }
    }
}

impl From<u64> for GameId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error returned when a string is not a valid game id.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid game id {0:?}")]
pub struct ParseGameIdError(pub String);

impl FromStr for GameId {
    type Err = ParseGameIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>()
            .map(GameId)
            .map_err(|_| ParseGameIdError(s.to_string()))
    }
}

impl Serialize for GameId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for GameId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(D::Error::custom)
    }
}

/// Serde adapter for queue links: `None` <-> [`NO_LINK`].
///
/// Use with `#[serde(with = "crate::core::id::link")]`.
pub mod link {
    use super::{GameId, NO_LINK};
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(link: &Option<GameId>, serializer: S) -> Result<S::Ok, S::Error> {
        match link {
            Some(id) => serializer.collect_str(id),
            None => serializer.serialize_str(NO_LINK),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<GameId>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if raw == NO_LINK {
            return Ok(None);
        }
        raw.parse().map(Some).map_err(D::Error::custom)
    }
}
