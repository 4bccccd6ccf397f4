//! Publish/subscribe transport seam.
//!
//! The real transport is an externally owned pub/sub client; this module
//! defines the surface the live updater depends on ([`Transport`] and
//! [`Channel`]) and the channel-naming contract shared with the backend.
//! [`local::LocalTransport`] is an in-process implementation used by tests
//! and local wiring.

pub mod local;

use std::fmt;

use crate::domain::{RoomId, UserId};

pub use local::LocalTransport;

/// Event name sent on a user channel when a room is created.
pub const ROOM_CREATED_EVENT: &str = "room-created";

/// Event name sent on a room channel when a message arrives.
pub const NEW_MESSAGE_EVENT: &str = "new-message";

/// Returns the user-level channel name for room-creation events.
///
/// The naming contract with the backend is `chat-room.<userId>`.
#[must_use]
pub fn user_channel(user_id: &UserId) -> String {
    format!("chat-room.{user_id}")
}

/// Returns the per-room channel name for message events.
///
/// The naming contract with the backend is `chat-room-message.<roomId>`.
#[must_use]
pub fn room_channel(room_id: &RoomId) -> String {
    format!("chat-room-message.{room_id}")
}

/// Callback invoked with an event's JSON payload.
pub type EventHandler = Box<dyn Fn(serde_json::Value) + Send + Sync>;

/// A named pub/sub topic on the transport.
pub trait Channel: fmt::Debug + Send + Sync {
    /// Binds a handler to an event name on this channel.
    fn bind(&self, event_name: &str, handler: EventHandler);

    /// Releases every handler bound on this channel.
    fn unbind_all(&self);
}

/// A publish/subscribe client.
///
/// The transport is a shared, externally owned singleton; callers manage
/// only the lifetime of their own subscriptions on it. It is injected as an
/// explicit dependency so tests can substitute a fake implementation.
pub trait Transport: fmt::Debug + Send + Sync + 'static {
    /// Channel handle type returned by [`Transport::subscribe`].
    type Channel: Channel;

    /// Opens (or joins) the named channel.
    fn subscribe(&self, channel_name: &str) -> Self::Channel;

    /// Closes the named channel for this client.
    fn unsubscribe(&self, channel_name: &str);
}
