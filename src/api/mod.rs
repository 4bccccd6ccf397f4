//! REST API layer: wire DTOs and the HTTP client.

pub mod client;
pub mod dto;

pub use client::ApiClient;
pub use dto::{ApiErrorBody, RawRoom, RoomListResponse};
