//! Whole-ledger export and import.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::record::{GameRecord, QueueAnchor};
use crate::core::AddressValidator;
use crate::error::CheckersError;
use crate::fifo;
use crate::store::{GameStore, MemoryStore};

/// Exported ledger state: the anchor plus every game, ordered by id.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genesis {
    #[serde(rename = "systemInfo")]
    pub anchor: QueueAnchor,

    #[serde(rename = "storedGameList")]
    pub games: Vec<GameRecord>,
}

impl Genesis {
    /// Check every record, then the queue built from them.
    pub fn validate(&self, validator: &dyn AddressValidator, board_size: usize) -> Result<(), CheckersError> {
        self.clone().into_store(validator, board_size).map(|_| ())
    }

    /// Load into a fresh store after validating.
    pub(crate) fn into_store(
        self,
        validator: &dyn AddressValidator,
        board_size: usize,
    ) -> Result<MemoryStore, CheckersError> {
        let mut seen = FxHashSet::default();
        let mut store = MemoryStore::new();
        for record in self.games {
            if !seen.insert(record.id) {
                return Err(CheckersError::InvalidRecord {
                    id: record.id,
                    reason: "duplicated game id".to_string(),
                });
            }
            if record.id >= self.anchor.next_id {
                return Err(CheckersError::InvalidRecord {
                    id: record.id,
                    reason: format!("id is not below the next id {}", self.anchor.next_id),
                });
            }
            if record.board.size() != board_size {
                return Err(CheckersError::InvalidRecord {
                    id: record.id,
                    reason: format!("board is {} squares wide, expected {}", record.board.size(), board_size),
                });
            }
            record.validate(validator)?;
            store.set(record);
        }
        store.set_anchor(self.anchor);
        fifo::check_integrity(&store, &self.anchor)?;
        Ok(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::core::{Clock, FixedClock, GameId, PrefixValidator, Side};

    const ALICE: &str = "cosmos1jmjfq0tplp9tmx4v9uemw72y4d2wa5nr3xn9d3";
    const BOB: &str = "cosmos1xyxs3skf3f4jfqeuv89yyaqvjc6lffavxqhc8g";

    fn single_game() -> Genesis {
        let record = GameRecord::new(
            GameId::new(1),
            ALICE.into(),
            ALICE.into(),
            BOB.into(),
            Board::standard(8),
            Side::Black,
            FixedClock::at_unix(0).now(),
        );
        Genesis {
            anchor: QueueAnchor {
                next_id: GameId::new(2),
                head: Some(GameId::new(1)),
                tail: Some(GameId::new(1)),
            },
            games: vec![record],
        }
    }

    #[test]
    fn test_default_is_valid() {
        let validator = PrefixValidator::new("cosmos");
        assert!(Genesis::default().validate(&validator, 8).is_ok());
    }

    #[test]
    fn test_single_game_is_valid() {
        let validator = PrefixValidator::new("cosmos");
        assert!(single_game().validate(&validator, 8).is_ok());
    }

    #[test]
    fn test_rejects_id_beyond_counter() {
        let validator = PrefixValidator::new("cosmos");
        let mut genesis = single_game();
        genesis.anchor.next_id = GameId::new(1);
        assert!(matches!(
            genesis.validate(&validator, 8),
            Err(CheckersError::InvalidRecord { .. })
        ));
    }

    #[test]
    fn test_rejects_duplicates() {
        let validator = PrefixValidator::new("cosmos");
        let mut genesis = single_game();
        genesis.games.push(genesis.games[0].clone());
        assert!(genesis.validate(&validator, 8).is_err());
    }

    #[test]
    fn test_rejects_unqueued_game() {
        let validator = PrefixValidator::new("cosmos");
        let mut genesis = single_game();
        genesis.anchor.head = None;
        genesis.anchor.tail = None;
        assert!(matches!(
            genesis.validate(&validator, 8),
            Err(CheckersError::QueueCorrupted { .. })
        ));
    }

    #[test]
    fn test_rejects_board_size_mismatch() {
        let validator = PrefixValidator::new("cosmos");
        assert!(single_game().validate(&validator, 10).is_err());
    }
}
