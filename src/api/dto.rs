//! Wire DTOs for the REST API.

use serde::Deserialize;

use crate::domain::{ChatRoom, LastMessage, RoomId, UserId};

/// Response body of `GET /chat-rooms`.
#[derive(Debug, Clone, Deserialize)]
pub struct RoomListResponse {
    /// The full room list for the current user.
    pub data: Vec<RawRoom>,
}

/// A room as returned by the API, before validation.
///
/// The identifier is optional here because the backend has been observed to
/// return entries without one; those are malformed and get filtered by the
/// loader rather than failing the whole fetch.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRoom {
    /// Room identifier, possibly missing on malformed entries.
    #[serde(default)]
    pub chat_room_id: Option<RoomId>,

    /// First participant.
    #[serde(default)]
    pub user1: UserId,

    /// Second participant.
    #[serde(default)]
    pub user2: UserId,

    /// Most recent message, if any.
    #[serde(default)]
    pub last_message: Option<LastMessage>,
}

impl RawRoom {
    /// Converts into a [`ChatRoom`], or `None` when the id is missing.
    #[must_use]
    pub fn into_room(self) -> Option<ChatRoom> {
        Some(ChatRoom {
            room_id: self.chat_room_id?,
            user1: self.user1,
            user2: self.user2,
            last_message: self.last_message,
        })
    }
}

/// Error body shape the API uses for non-success responses.
///
/// Servers are inconsistent about which field carries the message, so both
/// are accepted and the first present one wins.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    /// Primary error message field.
    #[serde(default)]
    pub error: Option<String>,

    /// Alternative message field.
    #[serde(default)]
    pub message: Option<String>,
}

impl ApiErrorBody {
    /// Returns the best available message, or a generic fallback.
    #[must_use]
    pub fn into_message(self) -> String {
        self.error
            .or(self.message)
            .unwrap_or_else(|| "request failed".to_string())
    }
}
