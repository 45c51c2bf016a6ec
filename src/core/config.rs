//! Ledger configuration.
//!
//! Fixed when the ledger is constructed:
//! - Board size (standard 8x8)
//! - How long a player may sit on a move before the game can be forfeited
//! - Optional cap on forfeitures processed per sweep
//! - Account address prefix used to validate player identifiers

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::error::CheckersError;

/// Smallest supported board edge.
pub const MIN_BOARD_SIZE: usize = 4;

/// Largest supported board edge.
pub const MAX_BOARD_SIZE: usize = 16;

/// Longest allowed per-move timeout: one year.
pub const MAX_TIMEOUT_SECS: i64 = 365 * 24 * 60 * 60;

/// Default time allowed per move: one day.
pub const DEFAULT_TIMEOUT_SECS: i64 = 24 * 60 * 60;

/// Complete ledger configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckersConfig {
    /// Board edge length (even).
    pub board_size: usize,

    /// Seconds a side may take before its game expires.
    pub default_timeout_secs: i64,

    /// Maximum games forfeited by one sweep. `None` drains every expired game.
    ///
    /// The remainder stays at the head of the queue for the next sweep.
    pub max_forfeits_per_sweep: Option<usize>,

    /// Human-readable prefix of valid player addresses.
    pub address_prefix: String,
}

impl Default for CheckersConfig {
    fn default() -> Self {
        Self {
            board_size: 8,
            default_timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_forfeits_per_sweep: None,
            address_prefix: "cosmos".to_string(),
        }
    }
}

impl CheckersConfig {
    /// Create the standard configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the board size.
    #[must_use]
    pub fn with_board_size(mut self, size: usize) -> Self {
        self.board_size = size;
        self
    }

    /// Set the per-move timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout_secs = timeout.num_seconds();
        self
    }

    /// Cap the forfeitures processed per sweep.
    #[must_use]
    pub fn with_max_forfeits_per_sweep(mut self, max: usize) -> Self {
        self.max_forfeits_per_sweep = Some(max);
        self
    }

    /// Set the address prefix.
    #[must_use]
    pub fn with_address_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.address_prefix = prefix.into();
        self
    }

    /// Per-move timeout as a duration, clamped to `0..=MAX_TIMEOUT_SECS`.
    #[must_use]
    pub fn default_timeout(&self) -> Duration {
        Duration::seconds(self.default_timeout_secs.clamp(0, MAX_TIMEOUT_SECS))
    }

    /// Check that every value is in range.
    pub fn validate(&self) -> Result<(), CheckersError> {
        if self.board_size % 2 != 0 || !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&self.board_size) {
            return Err(CheckersError::InvalidConfig {
                reason: format!(
                    "board size must be even and within {}..={}, got {}",
                    MIN_BOARD_SIZE, MAX_BOARD_SIZE, self.board_size
                ),
            });
        }
        if self.default_timeout_secs <= 0 || self.default_timeout_secs > MAX_TIMEOUT_SECS {
            return Err(CheckersError::InvalidConfig {
                reason: format!(
                    "timeout must be within 1..={}s, got {}s",
                    MAX_TIMEOUT_SECS, self.default_timeout_secs
                ),
            });
        }
        if self.max_forfeits_per_sweep == Some(0) {
            return Err(CheckersError::InvalidConfig {
                reason: "max forfeits per sweep must be at least 1".to_string(),
            });
        }
        if self.address_prefix.is_empty() {
            return Err(CheckersError::InvalidConfig {
                reason: "address prefix must not be empty".to_string(),
            });
        }
        Ok(())
    }
}
