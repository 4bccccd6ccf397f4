//! Session identity source.
//!
//! The live updater needs the current user's identifier to open the
//! user-level channel. Absence of an identifier is a valid, non-error
//! state (logged out): live updates are skipped and the room list stays
//! usable from the initial load.

use crate::config::ClientConfig;
use crate::domain::UserId;

/// Synchronous read of the current user's identity.
pub trait SessionIdentity: Send + Sync {
    /// Returns the logged-in user's id, or `None` when logged out.
    fn current_user_id(&self) -> Option<UserId>;
}

/// Fixed session identity, built from configuration (or a literal in tests).
#[derive(Debug, Clone, Default)]
pub struct StaticSession {
    user_id: Option<UserId>,
}

impl StaticSession {
    /// Creates a session for the given user.
    #[must_use]
    pub fn logged_in(user_id: UserId) -> Self {
        Self {
            user_id: Some(user_id),
        }
    }

    /// Creates a logged-out session.
    #[must_use]
    pub fn logged_out() -> Self {
        Self::default()
    }
}

impl From<&ClientConfig> for StaticSession {
    fn from(config: &ClientConfig) -> Self {
        Self {
            user_id: config.user_id.clone(),
        }
    }
}

impl SessionIdentity for StaticSession {
    fn current_user_id(&self) -> Option<UserId> {
        self.user_id.clone()
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn logged_in_returns_user() {
        let session = StaticSession::logged_in(UserId::from("u1"));
        assert_eq!(session.current_user_id(), Some(UserId::from("u1")));
    }

    #[test]
    fn logged_out_returns_none() {
        let session = StaticSession::logged_out();
        assert!(session.current_user_id().is_none());
    }
}
