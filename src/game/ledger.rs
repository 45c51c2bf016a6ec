//! The checkers state machine.
//!
//! `Ledger` composes the rules engine, the game records and the deadline
//! queue into the three operations the host's message router calls:
//! `create_game`, `play_move` and `sweep_expired`.
//!
//! ## Execution Model
//!
//! Single writer, run to completion. Each operation reads and writes through
//! a `Transaction` and commits once at the end; any error drops the
//! transaction, so nothing is persisted and no event is emitted.

use tracing::{debug, error, info, instrument, warn};

use super::genesis::Genesis;
use super::record::{validate_address, GameRecord, QueueAnchor};
use crate::board::Pos;
use crate::core::{AddressValidator, BlockTime, CheckersConfig, Clock, GameId, PrefixValidator, Side};
use crate::error::CheckersError;
use crate::events::{EventSink, LedgerEvent};
use crate::fifo;
use crate::rules::{Checkers, Move, MoveOutcome, RulesEngine};
use crate::store::{GameStore, MemoryStore, Transaction};

/// What a successful `play_move` did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveReport {
    pub id: GameId,

    /// Square of the captured piece, if any.
    pub captured: Option<Pos>,

    /// The same piece must jump again; the turn has not passed.
    pub must_continue: bool,

    /// The moved man was crowned.
    pub promoted: bool,

    /// Side to move next.
    pub turn: Side,

    /// `NoPlayer` unless this move ended the game.
    pub winner: Side,
}

/// Answer to a dry-run move check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveCheck {
    pub possible: bool,
    pub reason: String,
}

/// Checkers game ledger over a store.
pub struct Ledger<S: GameStore = MemoryStore, R: RulesEngine = Checkers> {
    config: CheckersConfig,
    store: S,
    rules: R,
    validator: Box<dyn AddressValidator>,
    events: Vec<LedgerEvent>,
}

impl Ledger<MemoryStore, Checkers> {
    /// Fresh in-memory ledger.
    pub fn new(config: CheckersConfig) -> Result<Self, CheckersError> {
        let rules = Checkers::new(config.board_size);
        Self::with_parts(config, MemoryStore::new(), rules)
    }

    /// Rebuild a ledger from exported state, checking it first.
    pub fn from_genesis(config: CheckersConfig, genesis: Genesis) -> Result<Self, CheckersError> {
        config.validate()?;
        let validator = PrefixValidator::new(config.address_prefix.clone());
        let store = genesis.into_store(&validator, config.board_size)?;
        let rules = Checkers::new(config.board_size);
        Self::with_parts(config, store, rules)
    }
}

impl<S: GameStore, R: RulesEngine> Ledger<S, R> {
    /// Ledger over an existing store and rules engine.
    pub fn with_parts(config: CheckersConfig, store: S, rules: R) -> Result<Self, CheckersError> {
        config.validate()?;
        if rules.board_size() != config.board_size {
            return Err(CheckersError::InvalidConfig {
                reason: format!(
                    "rules play on {} squares, config asks for {}",
                    rules.board_size(),
                    config.board_size
                ),
            });
        }
        let validator = Box::new(PrefixValidator::new(config.address_prefix.clone()));
        Ok(Self {
            config,
            store,
            rules,
            validator,
            events: Vec::new(),
        })
    }

    /// Replace the address validator.
    #[must_use]
    pub fn with_validator(mut self, validator: Box<dyn AddressValidator>) -> Self {
        self.validator = validator;
        self
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &CheckersConfig {
        &self.config
    }

    #[must_use]
    pub fn rules(&self) -> &R {
        &self.rules
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    // === Queries ===

    /// Load one game.
    #[must_use]
    pub fn game(&self, id: GameId) -> Option<GameRecord> {
        self.store.get(id)
    }

    /// Every game ever created, finished ones included, ordered by id.
    #[must_use]
    pub fn games(&self) -> Vec<GameRecord> {
        self.store.list_all()
    }

    #[must_use]
    pub fn anchor(&self) -> QueueAnchor {
        self.store.anchor()
    }

    /// In-progress games from stalest to most recently played.
    pub fn queue_order(&self) -> Result<Vec<GameId>, CheckersError> {
        fifo::walk_forward(&self.store, &self.store.anchor())
    }

    /// Verify queue links against every stored record.
    pub fn check_integrity(&self) -> Result<Vec<GameId>, CheckersError> {
        fifo::check_integrity(&self.store, &self.store.anchor())
    }

    /// Export state for a later `from_genesis`.
    #[must_use]
    pub fn export_genesis(&self) -> Genesis {
        Genesis {
            anchor: self.store.anchor(),
            games: self.store.list_all(),
        }
    }

    // === Events ===

    /// Events recorded since the last drain.
    #[must_use]
    pub fn events(&self) -> &[LedgerEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<LedgerEvent> {
        std::mem::take(&mut self.events)
    }

    /// Hand buffered events to `sink`, oldest first.
    pub fn flush_events(&mut self, sink: &mut dyn EventSink) {
        for event in self.events.drain(..) {
            sink.emit(event);
        }
    }

    // === Operations ===

    /// Start a game and queue it at the tail.
    ///
    /// The creator need not be one of the players.
    #[instrument(level = "debug", skip(self))]
    pub fn create_game(
        &mut self,
        creator: &str,
        red: &str,
        black: &str,
        now: BlockTime,
    ) -> Result<GameId, CheckersError> {
        validate_address(&*self.validator, "creator", creator)?;
        validate_address(&*self.validator, "red", red)?;
        validate_address(&*self.validator, "black", black)?;

        let deadline = self.deadline_after(now)?;

        let mut txn = Transaction::new(&mut self.store);
        let mut anchor = txn.anchor();
        let id = anchor.next_id;
        let next_id = id.checked_next().ok_or(CheckersError::IdsExhausted { last: id })?;
        if txn.contains(id) {
            return Err(CheckersError::InvalidRecord {
                id,
                reason: "next id is already in use".to_string(),
            });
        }

        let mut record = GameRecord::new(
            id,
            creator.into(),
            red.into(),
            black.into(),
            self.rules.initial_board(),
            self.rules.first_mover(),
            deadline,
        );
        fifo::append(&mut txn, &mut anchor, &mut record)?;
        txn.set(record);
        anchor.next_id = next_id;
        txn.set_anchor(anchor);
        txn.commit();

        info!(game_id = %id, red, black, "game created");
        self.events.push(LedgerEvent::GameCreated {
            id,
            creator: creator.into(),
            red: red.into(),
            black: black.into(),
        });
        Ok(id)
    }

    /// Apply one step for `player`.
    ///
    /// A jump that leaves another jump available keeps the turn with the
    /// same side and piece. Every accepted step renews the deadline and
    /// sends the game to the queue tail; a step that leaves the opponent
    /// without moves ends the game and detaches it.
    #[instrument(level = "debug", skip(self))]
    pub fn play_move(
        &mut self,
        id: GameId,
        player: &str,
        mv: Move,
        now: BlockTime,
    ) -> Result<MoveReport, CheckersError> {
        let (mut record, outcome) = self.prepare_move(id, player, mv).map_err(|err| {
            debug!(game_id = %id, %err, "move rejected");
            err
        })?;
        let deadline = self.deadline_after(now)?;

        record.board = outcome.board;
        if outcome.must_continue {
            record.pending_capture = Some(mv.to);
        } else {
            record.pending_capture = None;
            record.turn = record.turn.opponent();
            record.move_count += 1;
        }
        record.deadline = deadline;

        let winner = if outcome.must_continue {
            Side::NoPlayer
        } else {
            self.rules.winner_after(&record.board, record.turn)
        };

        let mut txn = Transaction::new(&mut self.store);
        let mut anchor = txn.anchor();
        fifo::move_to_tail(&mut txn, &mut anchor, &mut record)?;
        if winner.is_player() {
            record.winner = winner;
            fifo::remove(&mut txn, &mut anchor, &mut record)?;
        }
        let report = MoveReport {
            id,
            captured: outcome.captured,
            must_continue: outcome.must_continue,
            promoted: outcome.promoted,
            turn: record.turn,
            winner,
        };
        txn.set(record);
        txn.set_anchor(anchor);
        txn.commit();

        if winner.is_player() {
            info!(game_id = %id, %winner, "game won");
        } else {
            debug!(game_id = %id, %mv, must_continue = report.must_continue, "move played");
        }
        self.events.push(LedgerEvent::MovePlayed {
            id,
            player: player.into(),
            captured: outcome.captured,
            winner,
        });
        Ok(report)
    }

    /// Run every `play_move` check without changing anything.
    #[must_use]
    pub fn can_play_move(&self, id: GameId, player: &str, mv: Move) -> MoveCheck {
        match self.prepare_move(id, player, mv) {
            Ok(_) => MoveCheck {
                possible: true,
                reason: "ok".to_string(),
            },
            Err(err) => MoveCheck {
                possible: false,
                reason: err.to_string(),
            },
        }
    }

    /// Forfeit games whose deadline is at or before `now`, stalest first.
    ///
    /// The side owing the move loses. Stops at the first game still within
    /// its deadline, or after `max_forfeits_per_sweep` games; the rest stay
    /// queued in order for the next sweep. Queue corruption halts the sweep
    /// with a fatal error and nothing is persisted.
    #[instrument(level = "debug", skip(self))]
    pub fn sweep_expired(&mut self, now: BlockTime) -> Result<Vec<GameId>, CheckersError> {
        let limit = self.config.max_forfeits_per_sweep.unwrap_or(usize::MAX);
        let mut txn = Transaction::new(&mut self.store);
        let mut anchor = txn.anchor();

        let forfeited = match forfeit_expired(&mut txn, &mut anchor, now, limit) {
            Ok(forfeited) => forfeited,
            Err(err) => {
                error!(%err, "expiry sweep halted");
                return Err(err);
            }
        };
        txn.set_anchor(anchor);
        txn.commit();

        if forfeited.len() == limit {
            let backlog = fifo::peek_head(&self.store.anchor())
                .and_then(|id| self.store.get(id))
                .is_some_and(|head| head.is_expired(now));
            if backlog {
                warn!(limit, "sweep limit reached with expired games still queued");
            }
        }

        let mut ids = Vec::with_capacity(forfeited.len());
        for (id, winner) in forfeited {
            info!(game_id = %id, %winner, "game forfeited");
            self.events.push(LedgerEvent::GameForfeited { id, winner });
            ids.push(id);
        }
        Ok(ids)
    }

    /// Per-block hook: sweep against the host clock.
    pub fn end_block(&mut self, clock: &dyn Clock) -> Result<Vec<GameId>, CheckersError> {
        self.sweep_expired(clock.now())
    }

    // === Internals ===

    fn deadline_after(&self, now: BlockTime) -> Result<BlockTime, CheckersError> {
        let timeout = self.config.default_timeout();
        now.checked_add_signed(timeout)
            .ok_or(CheckersError::DeadlineOutOfRange {
                now,
                timeout_secs: timeout.num_seconds(),
            })
    }

    fn prepare_move(&self, id: GameId, player: &str, mv: Move) -> Result<(GameRecord, MoveOutcome), CheckersError> {
        validate_address(&*self.validator, "player", player)?;
        let record = self.store.get(id).ok_or(CheckersError::GameNotFound(id))?;
        if record.is_over() {
            return Err(CheckersError::GameAlreadyOver {
                id,
                winner: record.winner,
            });
        }

        let on_move = record.address_of(record.turn).map(|a| a.as_str());
        if on_move != Some(player) {
            if record.red.as_str() == player || record.black.as_str() == player {
                return Err(CheckersError::NotYourTurn { expected: record.turn });
            }
            return Err(CheckersError::NotAPlayer {
                id,
                player: player.to_string(),
            });
        }

        let outcome = self
            .rules
            .apply_move(&record.board, record.turn, mv, record.pending_capture)?;
        Ok((record, outcome))
    }
}

/// Pop expired games off the head and mark them forfeited.
fn forfeit_expired<S: GameStore + ?Sized>(
    store: &mut S,
    anchor: &mut QueueAnchor,
    now: BlockTime,
    limit: usize,
) -> Result<Vec<(GameId, Side)>, CheckersError> {
    let mut forfeited = Vec::new();
    while forfeited.len() < limit {
        let Some(head_id) = fifo::peek_head(anchor) else {
            break;
        };
        let head = store
            .get(head_id)
            .ok_or_else(|| CheckersError::corrupted(format!("head {} is missing from the store", head_id)))?;
        if !head.is_expired(now) {
            break;
        }
        if head.is_over() || !head.turn.is_player() {
            return Err(CheckersError::corrupted(format!(
                "game {} in queue is not in progress",
                head_id
            )));
        }

        let mut game = fifo::remove_head(store, anchor)?
            .ok_or_else(|| CheckersError::corrupted("queue emptied while sweeping"))?;
        game.winner = game.turn.opponent();
        game.forfeited = true;
        game.pending_capture = None;
        forfeited.push((game.id, game.winner));
        store.set(game);
    }
    Ok(forfeited)
}
