//! Notifications emitted by the ledger.
//!
//! The ledger produces the data; formatting and delivery belong to the host.
//! Events are buffered per ledger and only recorded once an operation has
//! committed, so a failed operation never emits anything.

use serde::{Deserialize, Serialize};

use crate::board::Pos;
use crate::core::{GameId, PlayerAddress, Side};

/// Something that happened to a game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action")]
pub enum LedgerEvent {
    #[serde(rename = "NewGameCreated")]
    GameCreated {
        id: GameId,
        creator: PlayerAddress,
        red: PlayerAddress,
        black: PlayerAddress,
    },

    MovePlayed {
        id: GameId,
        player: PlayerAddress,
        captured: Option<Pos>,
        /// `NoPlayer` unless this move ended the game.
        winner: Side,
    },

    GameForfeited { id: GameId, winner: Side },
}

impl LedgerEvent {
    /// Event type name.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            LedgerEvent::GameCreated { .. } => "NewGameCreated",
            LedgerEvent::MovePlayed { .. } => "MovePlayed",
            LedgerEvent::GameForfeited { .. } => "GameForfeited",
        }
    }

    /// Game the event is about.
    #[must_use]
    pub const fn game_id(&self) -> GameId {
        match self {
            LedgerEvent::GameCreated { id, .. }
            | LedgerEvent::MovePlayed { id, .. }
            | LedgerEvent::GameForfeited { id, .. } => *id,
        }
    }
}

/// Receiver of ledger events.
pub trait EventSink {
    fn emit(&mut self, event: LedgerEvent);
}

impl EventSink for Vec<LedgerEvent> {
    fn emit(&mut self, event: LedgerEvent) {
        self.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_kind_and_id() {
        let event = LedgerEvent::GameForfeited {
            id: GameId::new(4),
            winner: Side::Red,
        };
        assert_eq!(event.kind(), "GameForfeited");
        assert_eq!(event.game_id(), GameId::new(4));
    }

    #[test]
    fn test_vec_sink() {
        let mut sink: Vec<LedgerEvent> = Vec::new();
        sink.emit(LedgerEvent::GameForfeited {
            id: GameId::new(1),
            winner: Side::Black,
        });
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn test_event_serialization() {
        let event = LedgerEvent::MovePlayed {
            id: GameId::new(1),
            player: "carol".into(),
            captured: None,
            winner: Side::NoPlayer,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["action"], "MovePlayed");
        assert_eq!(json["id"], "1");
        assert_eq!(json["winner"], "*");

        let created = LedgerEvent::GameCreated {
            id: GameId::new(2),
            creator: "a".into(),
            red: "b".into(),
            black: "c".into(),
        };
        let json = serde_json::to_value(&created).unwrap();
        assert_eq!(json["action"], "NewGameCreated");
        let back: LedgerEvent = serde_json::from_value(json).unwrap();
        assert_eq!(back, created);
    }
}
