//! # placefront
//!
//! Client-side core for the placefront places app: keeps the chat-room
//! preview list in sync with a publish/subscribe event feed and submits
//! place reviews (rating, facility tags, text, photos) to the REST API.
//! There is no backend logic here: this crate is a thin presentation-layer
//! core over the REST API and an externally owned pub/sub transport.
//!
//! ## Architecture
//!
//! ```text
//! REST API                    Pub/Sub transport (injected)
//!     │                           │
//!     ├── ApiClient (api/)        ├── Transport / Channel (transport/)
//!     │                           │
//!     ├── RoomLoader (service/)   ├── LiveUpdater (service/)
//!     │        │                  │        │
//!     │        └────► SharedRoomList ◄─────┘
//!     │                  (domain/)
//!     └── ReviewService (service/)
//! ```
//!
//! The loader seeds the store once; the live updater derives channel
//! subscriptions from the store's membership and folds `room-created` and
//! `new-message` events back into it. The store's ordering invariant
//! (most recent activity first, message-less rooms last) holds after every
//! mutation.

pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod service;
pub mod session;
pub mod transport;
