//! In-process transport implementation.
//!
//! [`LocalTransport`] routes published events to handlers bound on named
//! channels, entirely in memory. It backs the live-updater tests and any
//! wiring where producer and consumer live in the same process. Handlers
//! are invoked synchronously on the publishing thread, after all internal
//! locks have been released, so a handler may subscribe or unsubscribe
//! without deadlocking.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use super::{Channel, EventHandler, Transport};

type SharedHandler = Arc<dyn Fn(serde_json::Value) + Send + Sync>;

#[derive(Default)]
struct ChannelState {
    bindings: Mutex<Vec<(String, SharedHandler)>>,
}

impl ChannelState {
    fn handlers_for(&self, event_name: &str) -> Vec<SharedHandler> {
        self.bindings
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|(event, _)| event == event_name)
            .map(|(_, handler)| Arc::clone(handler))
            .collect()
    }

    fn binding_count(&self) -> usize {
        self.bindings
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

/// In-memory pub/sub transport.
#[derive(Default)]
pub struct LocalTransport {
    channels: Mutex<HashMap<String, Arc<ChannelState>>>,
}

impl LocalTransport {
    /// Creates a transport with no channels.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Publishes an event to the named channel.
    ///
    /// Returns the number of handlers the event was delivered to. Unknown
    /// channels and channels without a matching binding deliver to zero
    /// handlers; the event is silently dropped.
    pub fn publish(&self, channel_name: &str, event_name: &str, payload: serde_json::Value) -> usize {
        let state = {
            let channels = self.channels.lock().unwrap_or_else(PoisonError::into_inner);
            channels.get(channel_name).map(Arc::clone)
        };
        let Some(state) = state else {
            return 0;
        };
        let handlers = state.handlers_for(event_name);
        for handler in &handlers {
            handler(payload.clone());
        }
        handlers.len()
    }

    /// Returns the number of currently subscribed channels.
    #[must_use]
    pub fn subscription_count(&self) -> usize {
        self.channels
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns `true` if the named channel is currently subscribed.
    #[must_use]
    pub fn is_subscribed(&self, channel_name: &str) -> bool {
        self.channels
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(channel_name)
    }

    /// Returns the number of handlers bound on the named channel.
    #[must_use]
    pub fn binding_count(&self, channel_name: &str) -> usize {
        self.channels
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(channel_name)
            .map_or(0, |state| state.binding_count())
    }
}

impl fmt::Debug for LocalTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalTransport")
            .field("subscriptions", &self.subscription_count())
            .finish()
    }
}

impl Transport for LocalTransport {
    type Channel = LocalChannel;

    fn subscribe(&self, channel_name: &str) -> LocalChannel {
        let mut channels = self.channels.lock().unwrap_or_else(PoisonError::into_inner);
        let state = channels
            .entry(channel_name.to_string())
            .or_default();
        LocalChannel {
            name: channel_name.to_string(),
            state: Arc::clone(state),
        }
    }

    fn unsubscribe(&self, channel_name: &str) {
        let mut channels = self.channels.lock().unwrap_or_else(PoisonError::into_inner);
        channels.remove(channel_name);
    }
}

/// Handle to a subscribed channel on a [`LocalTransport`].
///
/// Multiple handles to the same channel name share bindings, so a second
/// `subscribe` joins the existing channel rather than replacing it.
pub struct LocalChannel {
    name: String,
    state: Arc<ChannelState>,
}

impl fmt::Debug for LocalChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalChannel")
            .field("name", &self.name)
            .field("bindings", &self.state.binding_count())
            .finish()
    }
}

impl Channel for LocalChannel {
    fn bind(&self, event_name: &str, handler: EventHandler) {
        self.state
            .bindings
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((event_name.to_string(), Arc::from(handler)));
    }

    fn unbind_all(&self) {
        self.state
            .bindings
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}
