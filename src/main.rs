//! Room-list preview CLI.
//!
//! Loads the configured user's chat rooms once and prints the preview list,
//! newest activity first.

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use placefront::api::ApiClient;
use placefront::config::ClientConfig;
use placefront::domain::SharedRoomList;
use placefront::service::RoomLoader;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = ClientConfig::from_env();
    tracing::info!(api = %config.api_base_url, "starting placefront preview");

    let api = Arc::new(ApiClient::new(&config)?);
    let rooms = SharedRoomList::new();
    let loader = RoomLoader::new(api, rooms.clone());

    loader.load().await;

    for room in rooms.snapshot() {
        match &room.last_message {
            Some(last) => tracing::info!(
                room = %room.room_id,
                at = %last.created_at,
                from = %last.sender_id,
                text = %last.text,
                "room"
            ),
            None => tracing::info!(room = %room.room_id, "room (no messages yet)"),
        }
    }

    Ok(())
}
