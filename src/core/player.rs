//! Sides and player identification.
//!
//! ## Side
//!
//! The two colours of a checkers game plus `NoPlayer`, which stands for
//! "no winner yet" (and never moves). Persisted as the board symbols
//! `"r"`, `"b"` and `"*"`.
//!
//! ## PlayerAddress
//!
//! Players are opaque account addresses. The ledger only checks that an
//! address is well formed via an `AddressValidator`; it never interprets it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Side of the board.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// No side: the winner of an unfinished game.
    #[default]
    #[serde(rename = "*")]
    NoPlayer,
    #[serde(rename = "r")]
    Red,
    #[serde(rename = "b")]
    Black,
}

impl Side {
    /// The other colour. `NoPlayer` has no opponent.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Side::Red => Side::Black,
            Side::Black => Side::Red,
            Side::NoPlayer => Side::NoPlayer,
        }
    }

    /// True for `Red` and `Black`.
    #[must_use]
    pub const fn is_player(self) -> bool {
        !matches!(self, Side::NoPlayer)
    }

    /// Row direction this side's men advance in.
    ///
    /// Black starts on the low rows and moves towards higher `y`.
    #[must_use]
    pub const fn forward(self) -> i32 {
        match self {
            Side::Black => 1,
            Side::Red => -1,
            Side::NoPlayer => 0,
        }
    }

    /// Persisted symbol.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Side::Red => 'r',
            Side::Black => 'b',
            Side::NoPlayer => '*',
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Red => write!(f, "red"),
            Side::Black => write!(f, "black"),
            Side::NoPlayer => write!(f, "none"),
        }
    }
}

/// Opaque, validated player address.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerAddress(pub String);

impl PlayerAddress {
    /// Create an address without validating it.
    #[must_use]
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    /// Borrow the raw address.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PlayerAddress {
    fn from(address: &str) -> Self {
        Self::new(address)
    }
}

impl fmt::Display for PlayerAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Checks that a player identifier is well formed.
///
/// Returns a short human-readable reason on failure.
pub trait AddressValidator {
    fn validate(&self, address: &str) -> Result<(), String>;
}

/// Bech32 data-part alphabet.
const ADDRESS_CHARSET: &str = "qpzry9x8gf2tvdw0s3jn54khce6mua7l";

/// Length of the data part (20-byte account hash plus checksum).
const ADDRESS_DATA_LEN: usize = 38;

/// Validates `<prefix>1<data>` account addresses.
///
/// Checks the human-readable prefix, the `1` separator, the data alphabet and
/// the data length. Checksums are left to the host's account layer.
///
/// ```
/// use rust_checkers::core::{AddressValidator, PrefixValidator};
///
/// let validator = PrefixValidator::new("cosmos");
/// assert!(validator.validate("cosmos1jmjfq0tplp9tmx4v9uemw72y4d2wa5nr3xn9d3").is_ok());
/// assert!(validator.validate("notanaddress").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrefixValidator {
    prefix: String,
}

impl PrefixValidator {
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self { prefix: prefix.into() }
    }

    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl AddressValidator for PrefixValidator {
    fn validate(&self, address: &str) -> Result<(), String> {
        if address.is_empty() {
            return Err("empty address string is not allowed".to_string());
        }
        let Some(separator) = address.rfind('1') else {
            return Err("invalid separator index -1".to_string());
        };
        let (hrp, data) = (&address[..separator], &address[separator + 1..]);
        if hrp != self.prefix {
            return Err(format!("invalid Bech32 prefix; expected {}, got {}", self.prefix, hrp));
        }
        if let Some(bad) = data.chars().find(|c| !ADDRESS_CHARSET.contains(*c)) {
            return Err(format!("invalid character in data part: {:?}", bad));
        }
        if data.len() != ADDRESS_DATA_LEN {
            return Err(format!(
                "invalid data length; expected {}, got {}",
                ADDRESS_DATA_LEN,
                data.len()
            ));
        }
        Ok(())
    }
}
