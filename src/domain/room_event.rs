//! Transient pub/sub event payloads.
//!
//! Events are never stored: a `new-message` event only updates the matching
//! room's `last_message`, and a `room-created` event carries the full
//! [`super::ChatRoom`] shape and deserializes directly into it.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::{RoomId, UserId};

/// Payload of a `new-message` event after unwrapping its envelope.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MessageEvent {
    /// Room the message belongs to.
    #[serde(rename = "chat_room_id")]
    pub room_id: RoomId,

    /// Message body. The backend calls this field `message`.
    #[serde(rename = "message")]
    pub text: String,

    /// When the message was sent.
    pub created_at: DateTime<Utc>,

    /// Who sent it.
    pub sender_id: UserId,
}

/// Wire envelope of a `new-message` event.
///
/// The backend nests the message under a `message` key:
/// `{ "message": { "chat_room_id": …, "message": …, … } }`.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageEventEnvelope {
    /// The wrapped message payload.
    pub message: MessageEvent,
}
