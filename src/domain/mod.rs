//! Domain layer: identifiers, room model, events, the room-list store, and
//! the review submission model.

pub mod chat_room;
pub mod ids;
pub mod review;
pub mod room_event;
pub mod room_list;

pub use chat_room::{ChatRoom, LastMessage};
pub use ids::{RoomId, UserId};
pub use review::{Facility, FacilityId, PhotoAttachment, Rating, ReviewDraft};
pub use room_event::{MessageEvent, MessageEventEnvelope};
pub use room_list::{RoomList, SharedRoomList};
