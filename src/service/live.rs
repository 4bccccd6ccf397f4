//! Live updater: folds transport events into the room-list store and keeps
//! per-room channel subscriptions synchronized with the store's membership.
//!
//! Subscription state machine: each known room id has a subscription that is
//! either absent or active, plus one user-level subscription for the session.
//! Activation opens the user channel and a channel per room currently in the
//! store; a `room-created` event inserts the room and reconciles before
//! returning, so a new room's channel is open before its first message event
//! can arrive. Deactivation tears every subscription down, including when it
//! races a reconcile: both sides serialize on the state lock and reconcile
//! re-checks the active flag under it, so no subscription leaks.
//!
//! Handlers are fail-open. A malformed payload is logged, counted on the
//! rejected-event counter, and dropped; nothing propagates.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use crate::domain::{ChatRoom, MessageEventEnvelope, RoomId, SharedRoomList};
use crate::session::SessionIdentity;
use crate::transport::{
    Channel, NEW_MESSAGE_EVENT, ROOM_CREATED_EVENT, Transport, room_channel, user_channel,
};

/// Channels to open and close to make the open set match the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubscriptionDelta {
    /// Room ids present in the store but not yet subscribed.
    pub open: Vec<RoomId>,
    /// Subscribed room ids no longer present in the store. Rooms are never
    /// removed today, so this is empty in practice, but the delta stays
    /// total so reconciliation is deterministic.
    pub close: Vec<RoomId>,
}

impl SubscriptionDelta {
    /// Returns `true` when no subscription changes are needed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.open.is_empty() && self.close.is_empty()
    }
}

/// Computes the subscription delta between the store's current room ids and
/// the set of room ids with an open channel.
///
/// Pure and idempotent: applying the returned delta and calling again yields
/// an empty delta. Results are sorted for deterministic application order.
#[must_use]
pub fn reconcile_subscriptions(
    current: &HashSet<RoomId>,
    open: &HashSet<RoomId>,
) -> SubscriptionDelta {
    let mut delta = SubscriptionDelta {
        open: current.difference(open).cloned().collect(),
        close: open.difference(current).cloned().collect(),
    };
    delta.open.sort();
    delta.close.sort();
    delta
}

struct SubscriptionState<T: Transport> {
    user_channel: Option<(String, T::Channel)>,
    room_channels: HashMap<RoomId, T::Channel>,
}

impl<T: Transport> Default for SubscriptionState<T> {
    fn default() -> Self {
        Self {
            user_channel: None,
            room_channels: HashMap::new(),
        }
    }
}

struct Inner<T: Transport> {
    transport: Arc<T>,
    rooms: SharedRoomList,
    session: Arc<dyn SessionIdentity>,
    active: AtomicBool,
    rejected: AtomicU64,
    state: Mutex<SubscriptionState<T>>,
    // Handle to self for binding handlers; weak, so dropping the updater
    // releases the handler chain.
    self_weak: Weak<Inner<T>>,
}

impl<T: Transport> Inner<T> {
    fn lock_state(&self) -> MutexGuard<'_, SubscriptionState<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Opens channels for rooms the store knows about but the updater does
    /// not yet watch. Runs under the state lock; a deactivation that won the
    /// lock first clears the active flag, which is re-checked here, so a
    /// reconcile can never resurrect subscriptions after teardown.
    fn reconcile(&self) {
        if !self.active.load(Ordering::SeqCst) {
            return;
        }
        let current = self.rooms.ids();
        let mut state = self.lock_state();
        if !self.active.load(Ordering::SeqCst) {
            return;
        }

        let open: HashSet<RoomId> = state.room_channels.keys().cloned().collect();
        let delta = reconcile_subscriptions(&current, &open);

        for room_id in delta.close {
            if let Some(channel) = state.room_channels.remove(&room_id) {
                channel.unbind_all();
                self.transport.unsubscribe(&room_channel(&room_id));
                tracing::debug!(room_id = %room_id, "room subscription closed");
            }
        }

        for room_id in delta.open {
            let name = room_channel(&room_id);
            let channel = self.transport.subscribe(&name);
            let weak = Weak::clone(&self.self_weak);
            channel.bind(
                NEW_MESSAGE_EVENT,
                Box::new(move |payload| {
                    if let Some(inner) = weak.upgrade() {
                        inner.on_new_message(payload);
                    }
                }),
            );
            tracing::debug!(channel = %name, "subscribed to room channel");
            state.room_channels.insert(room_id, channel);
        }
    }

    fn on_room_created(&self, payload: serde_json::Value) {
        if !self.active.load(Ordering::SeqCst) {
            return;
        }
        match serde_json::from_value::<ChatRoom>(payload) {
            Ok(room) => {
                let room_id = room.room_id.clone();
                if self.rooms.insert_if_absent(room) {
                    tracing::info!(room_id = %room_id, "room created");
                }
                // Open the new room's channel before returning, so its first
                // message event already has a handler.
                self.reconcile();
            }
            Err(err) => self.reject(ROOM_CREATED_EVENT, &err),
        }
    }

    fn on_new_message(&self, payload: serde_json::Value) {
        if !self.active.load(Ordering::SeqCst) {
            return;
        }
        match serde_json::from_value::<MessageEventEnvelope>(payload) {
            Ok(envelope) => {
                let event = envelope.message;
                if !self.rooms.upsert_from_message(&event) {
                    tracing::debug!(room_id = %event.room_id, "message for unknown room dropped");
                }
            }
            Err(err) => self.reject(NEW_MESSAGE_EVENT, &err),
        }
    }

    fn reject(&self, event_name: &str, err: &serde_json::Error) {
        self.rejected.fetch_add(1, Ordering::SeqCst);
        tracing::warn!(event = event_name, error = %err, "malformed event payload dropped");
    }
}

/// Translates transport events into store mutations and manages channel
/// subscription lifetime. See the module docs for the state machine.
pub struct LiveUpdater<T: Transport> {
    inner: Arc<Inner<T>>,
}

impl<T: Transport> LiveUpdater<T> {
    /// Creates an inactive updater over the given collaborators.
    ///
    /// The transport is externally owned; the updater only manages its own
    /// subscriptions on it.
    #[must_use]
    pub fn new(
        transport: Arc<T>,
        rooms: SharedRoomList,
        session: Arc<dyn SessionIdentity>,
    ) -> Self {
        Self {
            inner: Arc::new_cyclic(|weak| Inner {
                transport,
                rooms,
                session,
                active: AtomicBool::new(false),
                rejected: AtomicU64::new(0),
                state: Mutex::new(SubscriptionState::default()),
                self_weak: Weak::clone(weak),
            }),
        }
    }

    /// Opens the user-level subscription and one subscription per room
    /// currently in the store.
    ///
    /// With no user id available this is a degraded no-op: it logs, opens
    /// nothing, and the room list stays usable from the initial load.
    /// Calling `activate` while already active is a no-op.
    pub fn activate(&self) {
        if self.inner.active.swap(true, Ordering::SeqCst) {
            tracing::debug!("live updater already active");
            return;
        }

        let Some(user_id) = self.inner.session.current_user_id() else {
            self.inner.active.store(false, Ordering::SeqCst);
            tracing::warn!("no user id available, live updates disabled");
            return;
        };

        let name = user_channel(&user_id);
        let channel = self.inner.transport.subscribe(&name);
        let weak = Arc::downgrade(&self.inner);
        channel.bind(
            ROOM_CREATED_EVENT,
            Box::new(move |payload| {
                if let Some(inner) = weak.upgrade() {
                    inner.on_room_created(payload);
                }
            }),
        );
        tracing::info!(channel = %name, "subscribed to user channel");
        self.inner.lock_state().user_channel = Some((name, channel));

        self.inner.reconcile();
    }

    /// Re-runs the per-room subscription step against the store's current
    /// membership. Idempotent; called automatically when a `room-created`
    /// event grows the id set, and available to callers that mutate the
    /// store directly.
    pub fn reconcile(&self) {
        self.inner.reconcile();
    }

    /// Closes every open subscription and releases all bound handlers.
    ///
    /// Safe to call at any time, including mid-reconciliation: events
    /// delivered after deactivation begins are discarded by the handlers'
    /// active check, and the state lock serializes against an in-flight
    /// reconcile. Idempotent.
    pub fn deactivate(&self) {
        self.inner.active.store(false, Ordering::SeqCst);
        let mut state = self.inner.lock_state();

        if let Some((name, channel)) = state.user_channel.take() {
            channel.unbind_all();
            self.inner.transport.unsubscribe(&name);
            tracing::debug!(channel = %name, "unsubscribed from user channel");
        }
        for (room_id, channel) in state.room_channels.drain() {
            channel.unbind_all();
            self.inner.transport.unsubscribe(&room_channel(&room_id));
            tracing::debug!(room_id = %room_id, "unsubscribed from room channel");
        }
    }

    /// Returns `true` while the updater holds live subscriptions.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.inner.active.load(Ordering::SeqCst)
    }

    /// Number of malformed event payloads dropped so far.
    #[must_use]
    pub fn rejected_events(&self) -> u64 {
        self.inner.rejected.load(Ordering::SeqCst)
    }

    /// Number of per-room subscriptions currently open.
    #[must_use]
    pub fn open_room_subscriptions(&self) -> usize {
        self.inner.lock_state().room_channels.len()
    }
}

impl<T: Transport> fmt::Debug for LiveUpdater<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LiveUpdater")
            .field("active", &self.is_active())
            .field("open_rooms", &self.open_room_subscriptions())
            .field("rejected_events", &self.rejected_events())
            .finish()
    }
}
