//! Initial room-list loader.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::api::ApiClient;
use crate::api::dto::RawRoom;
use crate::domain::{ChatRoom, SharedRoomList};

/// One-shot loader that seeds the room-list store from the API.
///
/// Issues a single fetch, filters out malformed entries, and replaces the
/// store contents. A failed fetch is logged and leaves the store as it was
/// (empty on first load); there is no retry. The loading flag is `true` for
/// the duration of [`RoomLoader::load`] and `false` afterward regardless of
/// outcome, so the presentation layer can clear its spinner either way.
#[derive(Debug)]
pub struct RoomLoader {
    api: Arc<ApiClient>,
    rooms: SharedRoomList,
    loading: AtomicBool,
}

impl RoomLoader {
    /// Creates a loader targeting the given store.
    #[must_use]
    pub fn new(api: Arc<ApiClient>, rooms: SharedRoomList) -> Self {
        Self {
            api,
            rooms,
            loading: AtomicBool::new(true),
        }
    }

    /// Fetches the full room list once and seeds the store.
    pub async fn load(&self) {
        self.loading.store(true, Ordering::SeqCst);
        match self.api.get_chat_rooms().await {
            Ok(response) => {
                let rooms = sanitize_rooms(response.data);
                tracing::info!(count = rooms.len(), "chat rooms loaded");
                self.rooms.replace_all(rooms);
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to fetch chat rooms");
            }
        }
        self.loading.store(false, Ordering::SeqCst);
    }

    /// Returns `true` while the initial fetch is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }
}

/// Drops entries without a room id, warning per skipped entry.
fn sanitize_rooms(raw: Vec<RawRoom>) -> Vec<ChatRoom> {
    raw.into_iter()
        .filter_map(|entry| match entry.into_room() {
            Some(room) => Some(room),
            None => {
                tracing::warn!("room without chat_room_id skipped");
                None
            }
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::domain::RoomId;

    fn raw(id: Option<&str>) -> RawRoom {
        RawRoom {
            chat_room_id: id.map(RoomId::from),
            user1: "u1".into(),
            user2: "u2".into(),
            last_message: None,
        }
    }

    #[test]
    fn sanitize_skips_entries_without_id() {
        let rooms = sanitize_rooms(vec![raw(Some("r1")), raw(None), raw(Some("r2"))]);
        assert_eq!(rooms.len(), 2);
        assert!(rooms.iter().all(|r| !r.room_id.as_str().is_empty()));
    }

    #[tokio::test]
    async fn failed_fetch_leaves_store_empty_and_clears_loading() {
        // Nothing listens on this port; the fetch fails fast.
        let config = ClientConfig {
            api_base_url: "http://127.0.0.1:9".to_string(),
            request_timeout_secs: 1,
            auth_token: None,
            user_id: None,
        };
        let Ok(api) = ApiClient::new(&config) else {
            panic!("client should build");
        };
        let rooms = SharedRoomList::new();
        let loader = RoomLoader::new(Arc::new(api), rooms.clone());

        assert!(loader.is_loading());
        loader.load().await;
        assert!(!loader.is_loading());
        assert!(rooms.is_empty());
    }
}
