//! Ordered in-memory store for the chat-room preview list.
//!
//! [`RoomList`] holds the canonical room list, keyed by room id and ordered
//! by most-recent-activity descending. Every mutation re-sorts the full list
//! before returning, so callers never observe a partially ordered state.
//! [`SharedRoomList`] is the clone-handle used by the loader and the live
//! updater; all mutations happen on one logical thread, the lock only makes
//! the handle shareable across handler closures.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use super::{ChatRoom, MessageEvent, RoomId};

/// Canonical ordered collection of chat rooms.
///
/// # Invariants
///
/// - At most one entry per [`RoomId`].
/// - The list is always sorted by [`ChatRoom::last_activity`] descending;
///   rooms with no message sort last. Sorting is stable, so ties keep
///   their prior relative order.
#[derive(Debug, Default)]
pub struct RoomList {
    rooms: Vec<ChatRoom>,
}

impl RoomList {
    /// Creates an empty room list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the entire contents with freshly loaded rooms.
    ///
    /// Duplicate room ids in the input keep their first occurrence; later
    /// duplicates are logged and dropped so the uniqueness invariant holds.
    pub fn replace_all(&mut self, rooms: Vec<ChatRoom>) {
        let mut seen = HashSet::with_capacity(rooms.len());
        let mut deduped = Vec::with_capacity(rooms.len());
        for room in rooms {
            if seen.insert(room.room_id.clone()) {
                deduped.push(room);
            } else {
                tracing::warn!(room_id = %room.room_id, "duplicate room in seed data, dropped");
            }
        }
        self.rooms = deduped;
        self.sort();
    }

    /// Folds a `new-message` event into the matching room.
    ///
    /// Replaces the room's `last_message` and re-sorts. If no room with the
    /// event's id exists the list is left unchanged and `false` is returned;
    /// the event is simply dropped.
    pub fn upsert_from_message(&mut self, event: &MessageEvent) -> bool {
        let Some(room) = self.rooms.iter_mut().find(|r| r.room_id == event.room_id) else {
            return false;
        };
        room.last_message = Some(super::LastMessage {
            text: event.text.clone(),
            created_at: event.created_at,
            sender_id: event.sender_id.clone(),
        });
        self.sort();
        true
    }

    /// Inserts a newly created room unless its id is already present.
    ///
    /// Duplicate insertion is benign: it is logged and ignored, returning
    /// `false`. Otherwise the room is prepended and the list re-sorted.
    pub fn insert_if_absent(&mut self, room: ChatRoom) -> bool {
        if self.contains(&room.room_id) {
            tracing::debug!(room_id = %room.room_id, "room already exists, insert ignored");
            return false;
        }
        self.rooms.insert(0, room);
        self.sort();
        true
    }

    /// Returns `true` if a room with the given id is present.
    #[must_use]
    pub fn contains(&self, room_id: &RoomId) -> bool {
        self.rooms.iter().any(|r| &r.room_id == room_id)
    }

    /// Returns the current set of room ids.
    #[must_use]
    pub fn ids(&self) -> HashSet<RoomId> {
        self.rooms.iter().map(|r| r.room_id.clone()).collect()
    }

    /// Returns the rooms in their current (sorted) order.
    #[must_use]
    pub fn rooms(&self) -> &[ChatRoom] {
        &self.rooms
    }

    /// Returns the number of rooms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    /// Returns `true` if the list contains no rooms.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    fn sort(&mut self) {
        self.rooms
            .sort_by(|a, b| b.last_activity().cmp(&a.last_activity()));
    }
}

/// Clonable handle to a [`RoomList`] shared between the loader, the live
/// updater's event handlers, and the presentation layer.
///
/// Lock poisoning is recovered rather than propagated: store operations are
/// plain data manipulation and never panic, and the list must stay readable
/// even if an unrelated caller panicked while holding the lock.
#[derive(Debug, Clone, Default)]
pub struct SharedRoomList {
    inner: Arc<Mutex<RoomList>>,
}

impl SharedRoomList {
    /// Creates a handle to a new empty room list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// See [`RoomList::replace_all`].
    pub fn replace_all(&self, rooms: Vec<ChatRoom>) {
        self.lock().replace_all(rooms);
    }

    /// See [`RoomList::upsert_from_message`].
    pub fn upsert_from_message(&self, event: &MessageEvent) -> bool {
        self.lock().upsert_from_message(event)
    }

    /// See [`RoomList::insert_if_absent`].
    pub fn insert_if_absent(&self, room: ChatRoom) -> bool {
        self.lock().insert_if_absent(room)
    }

    /// Returns the current set of room ids.
    #[must_use]
    pub fn ids(&self) -> HashSet<RoomId> {
        self.lock().ids()
    }

    /// Returns a point-in-time copy of the ordered room list.
    #[must_use]
    pub fn snapshot(&self) -> Vec<ChatRoom> {
        self.lock().rooms().to_vec()
    }

    /// Returns the number of rooms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns `true` if the list contains no rooms.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, RoomList> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::{LastMessage, UserId};
    use chrono::{DateTime, Utc};

    fn ts(s: &str) -> DateTime<Utc> {
        let Ok(parsed) = s.parse() else {
            panic!("invalid test timestamp: {s}");
        };
        parsed
    }

    fn room(id: &str, created_at: Option<&str>) -> ChatRoom {
        ChatRoom {
            room_id: RoomId::from(id),
            user1: UserId::from("u1"),
            user2: UserId::from("u2"),
            last_message: created_at.map(|at| LastMessage {
                text: "msg".to_string(),
                created_at: ts(at),
                sender_id: UserId::from("u2"),
            }),
        }
    }

    fn message(id: &str, created_at: &str) -> MessageEvent {
        MessageEvent {
            room_id: RoomId::from(id),
            text: "hi".to_string(),
            created_at: ts(created_at),
            sender_id: UserId::from("u1"),
        }
    }

    fn order(list: &RoomList) -> Vec<&str> {
        list.rooms().iter().map(|r| r.room_id.as_str()).collect()
    }

    #[test]
    fn seed_orders_rooms_with_missing_timestamps_last() {
        let mut list = RoomList::new();
        list.replace_all(vec![
            room("r2", None),
            room("r1", Some("2024-01-01T00:00:00Z")),
        ]);
        assert_eq!(order(&list), ["r1", "r2"]);
    }

    #[test]
    fn upsert_moves_room_to_front() {
        let mut list = RoomList::new();
        list.replace_all(vec![room("r1", Some("2024-01-01T00:00:00Z")), room("r2", None)]);

        let updated = list.upsert_from_message(&message("r2", "2024-06-01T00:00:00Z"));
        assert!(updated);
        assert_eq!(order(&list), ["r2", "r1"]);

        let Some(r2) = list.rooms().first() else {
            panic!("list should not be empty");
        };
        let Some(last) = &r2.last_message else {
            panic!("r2 should have a last message");
        };
        assert_eq!(last.text, "hi");
        assert_eq!(last.sender_id, UserId::from("u1"));
    }

    #[test]
    fn upsert_unknown_room_leaves_list_unchanged() {
        let mut list = RoomList::new();
        list.replace_all(vec![room("r1", Some("2024-01-01T00:00:00Z")), room("r2", None)]);
        let before = list.rooms().to_vec();

        let updated = list.upsert_from_message(&message("r9", "2024-06-01T00:00:00Z"));
        assert!(!updated);
        assert_eq!(list.rooms(), before.as_slice());
    }

    #[test]
    fn insert_if_absent_is_idempotent() {
        let mut list = RoomList::new();
        list.replace_all(vec![room("r1", Some("2024-01-01T00:00:00Z")), room("r2", None)]);

        let inserted = list.insert_if_absent(room("r1", Some("2025-01-01T00:00:00Z")));
        assert!(!inserted);
        assert_eq!(list.len(), 2);
        // The existing entry is untouched, not replaced.
        let Some(r1) = list.rooms().iter().find(|r| r.room_id.as_str() == "r1") else {
            panic!("r1 should still be present");
        };
        assert_eq!(r1.last_activity(), ts("2024-01-01T00:00:00Z"));
    }

    #[test]
    fn insert_sequences_never_produce_duplicates() {
        let mut list = RoomList::new();
        let ids = ["a", "b", "a", "c", "b", "a"];
        for id in ids {
            let _ = list.insert_if_absent(room(id, None));
        }
        assert_eq!(list.len(), 3);
        let unique: HashSet<_> = list.ids();
        assert_eq!(unique.len(), list.len());
    }

    #[test]
    fn list_stays_sorted_after_every_mutation() {
        let mut list = RoomList::new();
        let _ = list.insert_if_absent(room("a", Some("2024-03-01T00:00:00Z")));
        let _ = list.insert_if_absent(room("b", None));
        let _ = list.insert_if_absent(room("c", Some("2024-05-01T00:00:00Z")));
        let _ = list.upsert_from_message(&message("b", "2024-04-01T00:00:00Z"));

        let keys: Vec<_> = list.rooms().iter().map(ChatRoom::last_activity).collect();
        let mut sorted = keys.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(keys, sorted);
        assert_eq!(order(&list), ["c", "b", "a"]);
    }

    #[test]
    fn replace_all_drops_duplicate_seed_ids() {
        let mut list = RoomList::new();
        list.replace_all(vec![
            room("r1", Some("2024-01-01T00:00:00Z")),
            room("r1", None),
            room("r2", None),
        ]);
        assert_eq!(list.len(), 2);
        let Some(r1) = list.rooms().iter().find(|r| r.room_id.as_str() == "r1") else {
            panic!("r1 should be present");
        };
        // First occurrence wins.
        assert!(r1.last_message.is_some());
    }

    #[test]
    fn shared_handle_sees_mutations_from_clones() {
        let shared = SharedRoomList::new();
        let clone = shared.clone();
        let _ = clone.insert_if_absent(room("r1", None));
        assert_eq!(shared.len(), 1);
        assert!(shared.ids().contains(&RoomId::from("r1")));
    }
}
