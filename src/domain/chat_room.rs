//! Chat room aggregate with its most-recent-message summary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{RoomId, UserId};

/// A two-participant conversation thread as shown in the room list.
///
/// Field names on the wire follow the backend JSON (`chat_room_id`,
/// `last_message`). The `room-created` pub/sub event carries exactly this
/// shape, so it deserializes straight into `ChatRoom`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRoom {
    /// Unique room identifier (immutable after creation).
    #[serde(rename = "chat_room_id")]
    pub room_id: RoomId,

    /// First participant.
    pub user1: UserId,

    /// Second participant.
    pub user2: UserId,

    /// Most recent message in the room, if any message has been sent.
    #[serde(default)]
    pub last_message: Option<LastMessage>,
}

impl ChatRoom {
    /// Returns the ordering key for the room list.
    ///
    /// Rooms are ordered by the timestamp of their last message, newest
    /// first. A room with no message yet sorts as the Unix epoch, i.e.
    /// after every room that has activity.
    #[must_use]
    pub fn last_activity(&self) -> DateTime<Utc> {
        self.last_message
            .as_ref()
            .map_or(DateTime::UNIX_EPOCH, |m| m.created_at)
    }
}

/// Summary of the most recent message in a room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastMessage {
    /// Message body. The backend calls this field `message`.
    #[serde(rename = "message")]
    pub text: String,

    /// When the message was sent.
    pub created_at: DateTime<Utc>,

    /// Who sent it.
    pub sender_id: UserId,
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn last_activity_defaults_to_epoch() {
        let room = ChatRoom {
            room_id: RoomId::from("r1"),
            user1: UserId::from("u1"),
            user2: UserId::from("u2"),
            last_message: None,
        };
        assert_eq!(room.last_activity(), DateTime::UNIX_EPOCH);
    }

    #[test]
    fn last_activity_uses_message_timestamp() {
        let json = r#"{
            "chat_room_id": "r1",
            "user1": "u1",
            "user2": "u2",
            "last_message": {
                "message": "hello",
                "created_at": "2024-01-01T00:00:00Z",
                "sender_id": "u2"
            }
        }"#;
        let room: Result<ChatRoom, _> = serde_json::from_str(json);
        let Ok(room) = room else {
            panic!("room should deserialize");
        };
        assert_eq!(room.room_id, RoomId::from("r1"));
        let Some(last) = &room.last_message else {
            panic!("last_message should be present");
        };
        assert_eq!(last.text, "hello");
        assert_eq!(room.last_activity(), last.created_at);
    }

    #[test]
    fn missing_last_message_field_deserializes() {
        let json = r#"{"chat_room_id": "r2", "user1": "u1", "user2": "u2"}"#;
        let room: Result<ChatRoom, _> = serde_json::from_str(json);
        let Ok(room) = room else {
            panic!("room without last_message should deserialize");
        };
        assert!(room.last_message.is_none());
    }

    #[test]
    fn missing_room_id_is_rejected() {
        let json = r#"{"user1": "u1", "user2": "u2"}"#;
        let room: Result<ChatRoom, _> = serde_json::from_str(json);
        assert!(room.is_err());
    }
}
