//! Deadline queue operations.
//!
//! Records are linked through their `before_id`/`after_id` fields and the
//! anchor's `head`/`tail`. Every function keeps both endpoints of every link
//! it touches in agreement and writes touched neighbours back to the store;
//! the record passed in is updated in place and left for the caller to
//! persist together with the anchor.

use rustc_hash::FxHashSet;
use tracing::trace;

use crate::core::GameId;
use crate::error::CheckersError;
use crate::game::{GameRecord, QueueAnchor};
use crate::store::GameStore;

fn load<S: GameStore + ?Sized>(store: &S, id: GameId, role: &str) -> Result<GameRecord, CheckersError> {
    store
        .get(id)
        .ok_or_else(|| CheckersError::corrupted(format!("{} {} is missing from the store", role, id)))
}

/// Id of the game with the oldest activity.
#[must_use]
pub fn peek_head(anchor: &QueueAnchor) -> Option<GameId> {
    anchor.head
}

/// Splice a detached record onto the tail.
pub fn append<S: GameStore + ?Sized>(
    store: &mut S,
    anchor: &mut QueueAnchor,
    record: &mut GameRecord,
) -> Result<(), CheckersError> {
    match anchor.tail {
        None => {
            record.before_id = None;
            record.after_id = None;
            anchor.head = Some(record.id);
        }
        Some(tail_id) => {
            let mut tail = load(store, tail_id, "tail")?;
            if tail.after_id.is_some() {
                return Err(CheckersError::corrupted(format!("tail {} has a successor", tail_id)));
            }
            tail.after_id = Some(record.id);
            store.set(tail);
            record.before_id = Some(tail_id);
            record.after_id = None;
        }
    }
    anchor.tail = Some(record.id);
    trace!(game_id = %record.id, "appended to deadline queue");
    Ok(())
}

/// Unlink a record from wherever it sits.
///
/// A record that is not queued at all is left untouched.
pub fn remove<S: GameStore + ?Sized>(
    store: &mut S,
    anchor: &mut QueueAnchor,
    record: &mut GameRecord,
) -> Result<(), CheckersError> {
    let id = record.id;
    if record.is_detached() && anchor.head != Some(id) {
        return Ok(());
    }

    match record.before_id {
        Some(prev_id) => {
            let mut prev = load(store, prev_id, "predecessor")?;
            if prev.after_id != Some(id) {
                return Err(CheckersError::corrupted(format!(
                    "{} precedes {} but links forward to {:?}",
                    prev_id, id, prev.after_id
                )));
            }
            prev.after_id = record.after_id;
            store.set(prev);
        }
        None => {
            if anchor.head != Some(id) {
                return Err(CheckersError::corrupted(format!("{} has no predecessor but is not the head", id)));
            }
            anchor.head = record.after_id;
        }
    }

    match record.after_id {
        Some(next_id) => {
            let mut next = load(store, next_id, "successor")?;
            if next.before_id != Some(id) {
                return Err(CheckersError::corrupted(format!(
                    "{} follows {} but links back to {:?}",
                    next_id, id, next.before_id
                )));
            }
            next.before_id = record.before_id;
            store.set(next);
        }
        None => {
            if anchor.tail != Some(id) {
                return Err(CheckersError::corrupted(format!("{} has no successor but is not the tail", id)));
            }
            anchor.tail = record.before_id;
        }
    }

    record.before_id = None;
    record.after_id = None;
    trace!(game_id = %id, "removed from deadline queue");
    Ok(())
}

/// Mark a record as most recently active.
///
/// No-op if it already is the tail.
pub fn move_to_tail<S: GameStore + ?Sized>(
    store: &mut S,
    anchor: &mut QueueAnchor,
    record: &mut GameRecord,
) -> Result<(), CheckersError> {
    if anchor.tail == Some(record.id) {
        return Ok(());
    }
    remove(store, anchor, record)?;
    append(store, anchor, record)
}

/// Detach and return the head, or `None` if the queue is empty.
pub fn remove_head<S: GameStore + ?Sized>(
    store: &mut S,
    anchor: &mut QueueAnchor,
) -> Result<Option<GameRecord>, CheckersError> {
    let Some(head_id) = anchor.head else {
        return Ok(None);
    };
    let mut head = load(store, head_id, "head")?;
    if head.before_id.is_some() {
        return Err(CheckersError::corrupted(format!("head {} has a predecessor", head_id)));
    }
    remove(store, anchor, &mut head)?;
    Ok(Some(head))
}

/// Ids from head to tail, checking link symmetry along the way.
pub fn walk_forward<S: GameStore + ?Sized>(store: &S, anchor: &QueueAnchor) -> Result<Vec<GameId>, CheckersError> {
    let mut order = Vec::new();
    let mut seen = FxHashSet::default();
    let mut prev = None;
    let mut cursor = anchor.head;
    while let Some(id) = cursor {
        if !seen.insert(id) {
            return Err(CheckersError::corrupted(format!("cycle at {} walking forward", id)));
        }
        let record = load(store, id, "queued game")?;
        if record.before_id != prev {
            return Err(CheckersError::corrupted(format!(
                "{} links back to {:?}, expected {:?}",
                id, record.before_id, prev
            )));
        }
        order.push(id);
        prev = Some(id);
        cursor = record.after_id;
    }
    if anchor.tail != prev {
        return Err(CheckersError::corrupted(format!(
            "walk ended at {:?} but tail is {:?}",
            prev, anchor.tail
        )));
    }
    Ok(order)
}

/// Ids from tail to head.
pub fn walk_backward<S: GameStore + ?Sized>(store: &S, anchor: &QueueAnchor) -> Result<Vec<GameId>, CheckersError> {
    let mut order = Vec::new();
    let mut seen = FxHashSet::default();
    let mut next = None;
    let mut cursor = anchor.tail;
    while let Some(id) = cursor {
        if !seen.insert(id) {
            return Err(CheckersError::corrupted(format!("cycle at {} walking backward", id)));
        }
        let record = load(store, id, "queued game")?;
        if record.after_id != next {
            return Err(CheckersError::corrupted(format!(
                "{} links forward to {:?}, expected {:?}",
                id, record.after_id, next
            )));
        }
        order.push(id);
        next = Some(id);
        cursor = record.before_id;
    }
    if anchor.head != next {
        return Err(CheckersError::corrupted(format!(
            "walk ended at {:?} but head is {:?}",
            next, anchor.head
        )));
    }
    Ok(order)
}

/// Full consistency check; returns the head-to-tail order.
///
/// Both walks must mirror each other and cover exactly the games still in
/// progress. Finished games must be detached. Scans every record.
pub fn check_integrity<S: GameStore + ?Sized>(store: &S, anchor: &QueueAnchor) -> Result<Vec<GameId>, CheckersError> {
    let forward = walk_forward(store, anchor)?;
    let mut backward = walk_backward(store, anchor)?;
    backward.reverse();
    if forward != backward {
        return Err(CheckersError::corrupted("forward and backward walks disagree"));
    }

    let queued: FxHashSet<GameId> = forward.iter().copied().collect();
    for record in store.list_all() {
        match (record.is_over(), queued.contains(&record.id)) {
            (false, false) => {
                return Err(CheckersError::corrupted(format!("game {} in progress but not queued", record.id)));
            }
            (true, true) => {
                return Err(CheckersError::corrupted(format!("finished game {} still queued", record.id)));
            }
            (true, false) if !record.is_detached() => {
                return Err(CheckersError::corrupted(format!("finished game {} keeps queue links", record.id)));
            }
            _ => {}
        }
    }
    Ok(forward)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::core::{Clock, FixedClock, Side};
    use crate::store::MemoryStore;

    fn game(id: u64) -> GameRecord {
        GameRecord::new(
            GameId::new(id),
            "creator".into(),
            "red".into(),
            "black".into(),
            Board::standard(8),
            Side::Black,
            FixedClock::at_unix(0).now(),
        )
    }

    fn ids(raw: &[u64]) -> Vec<GameId> {
        raw.iter().copied().map(GameId::new).collect()
    }

    /// Store with games 1..=n appended in order.
    fn queue_of(n: u64) -> (MemoryStore, QueueAnchor) {
        let mut store = MemoryStore::new();
        let mut anchor = QueueAnchor::default();
        for id in 1..=n {
            let mut record = game(id);
            append(&mut store, &mut anchor, &mut record).unwrap();
            store.set(record);
        }
        (store, anchor)
    }

    #[test]
    fn test_append_to_empty() {
        let (store, anchor) = queue_of(1);
        assert_eq!(anchor.head, Some(GameId::new(1)));
        assert_eq!(anchor.tail, Some(GameId::new(1)));
        assert!(store.get(GameId::new(1)).unwrap().is_detached());
        assert_eq!(check_integrity(&store, &anchor).unwrap(), ids(&[1]));
    }

    #[test]
    fn test_append_links_both_ends() {
        let (store, anchor) = queue_of(3);
        let first = store.get(GameId::new(1)).unwrap();
        let middle = store.get(GameId::new(2)).unwrap();
        let last = store.get(GameId::new(3)).unwrap();

        assert_eq!((first.before_id, first.after_id), (None, Some(GameId::new(2))));
        assert_eq!((middle.before_id, middle.after_id), (Some(GameId::new(1)), Some(GameId::new(3))));
        assert_eq!((last.before_id, last.after_id), (Some(GameId::new(2)), None));
        assert_eq!(walk_forward(&store, &anchor).unwrap(), ids(&[1, 2, 3]));
        assert_eq!(walk_backward(&store, &anchor).unwrap(), ids(&[3, 2, 1]));
    }

    #[test]
    fn test_move_head_to_tail() {
        let (mut store, mut anchor) = queue_of(3);
        let mut record = store.get(GameId::new(1)).unwrap();
        move_to_tail(&mut store, &mut anchor, &mut record).unwrap();
        store.set(record);

        assert_eq!(check_integrity(&store, &anchor).unwrap(), ids(&[2, 3, 1]));
    }

    #[test]
    fn test_move_middle_to_tail() {
        let (mut store, mut anchor) = queue_of(3);
        let mut record = store.get(GameId::new(2)).unwrap();
        move_to_tail(&mut store, &mut anchor, &mut record).unwrap();
        store.set(record);

        assert_eq!(check_integrity(&store, &anchor).unwrap(), ids(&[1, 3, 2]));
    }

    #[test]
    fn test_move_tail_is_noop() {
        let (mut store, mut anchor) = queue_of(3);
        let before = store.clone();
        let mut record = store.get(GameId::new(3)).unwrap();
        move_to_tail(&mut store, &mut anchor, &mut record).unwrap();

        assert_eq!(store, before);
        assert_eq!(record, before.get(GameId::new(3)).unwrap());
    }

    #[test]
    fn test_remove_head_drains_in_order() {
        let (mut store, mut anchor) = queue_of(3);
        let mut drained = Vec::new();
        while let Some(mut head) = remove_head(&mut store, &mut anchor).unwrap() {
            assert!(head.is_detached());
            head.winner = Side::Red;
            drained.push(head.id);
            store.set(head);
        }
        assert_eq!(drained, ids(&[1, 2, 3]));
        assert_eq!(anchor.head, None);
        assert_eq!(anchor.tail, None);
        assert_eq!(peek_head(&anchor), None);
    }

    #[test]
    fn test_remove_tail() {
        let (mut store, mut anchor) = queue_of(2);
        let mut record = store.get(GameId::new(2)).unwrap();
        remove(&mut store, &mut anchor, &mut record).unwrap();
        record.winner = Side::Black;
        store.set(record);

        assert_eq!(anchor.tail, Some(GameId::new(1)));
        assert_eq!(check_integrity(&store, &anchor).unwrap(), ids(&[1]));
    }

    #[test]
    fn test_remove_unqueued_is_noop() {
        let (mut store, mut anchor) = queue_of(2);
        let mut stray = game(9);
        let before = anchor;
        remove(&mut store, &mut anchor, &mut stray).unwrap();
        assert_eq!(anchor, before);
    }

    #[test]
    fn test_missing_neighbour_is_corruption() {
        let (mut store, mut anchor) = queue_of(2);
        anchor.tail = Some(GameId::new(7));
        let mut record = game(3);
        let err = append(&mut store, &mut anchor, &mut record).unwrap_err();
        assert!(err.is_fatal());
    }

    #[test]
    fn test_integrity_detects_broken_back_link() {
        let (mut store, anchor) = queue_of(3);
        let mut middle = store.get(GameId::new(2)).unwrap();
        middle.before_id = Some(GameId::new(3));
        store.set(middle);

        assert!(walk_forward(&store, &anchor).is_err());
        assert!(check_integrity(&store, &anchor).is_err());
    }

    #[test]
    fn test_integrity_detects_unqueued_game() {
        let (mut store, anchor) = queue_of(2);
        store.set(game(3));
        assert!(check_integrity(&store, &anchor).is_err());
    }
}
