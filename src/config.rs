//! Client configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`).

use crate::domain::UserId;

/// Top-level client configuration.
///
/// Loaded once at startup via [`ClientConfig::from_env`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the REST API, without a trailing slash
    /// (e.g. `http://localhost:8000/api`).
    pub api_base_url: String,

    /// Timeout in seconds applied to every HTTP request.
    pub request_timeout_secs: u64,

    /// Bearer token for authenticated endpoints. Absent when logged out.
    pub auth_token: Option<String>,

    /// Identifier of the logged-in user. Absent is a valid state: live
    /// updates are disabled but the room list can still be loaded.
    pub user_id: Option<UserId>,
}

impl ClientConfig {
    /// Loads configuration from environment variables.
    ///
    /// Falls back to sensible defaults when a variable is not set.
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    #[must_use]
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let api_base_url = std::env::var("API_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:8000/api".to_string())
            .trim_end_matches('/')
            .to_string();

        let request_timeout_secs = parse_env("REQUEST_TIMEOUT_SECS", 10);

        let auth_token = std::env::var("AUTH_TOKEN").ok().filter(|t| !t.is_empty());
        let user_id = std::env::var("USER_ID")
            .ok()
            .filter(|u| !u.is_empty())
            .map(UserId::from);

        Self {
            api_base_url,
            request_timeout_secs,
            auth_token,
            user_id,
        }
    }
}

/// Parses an environment variable as `T`, returning `default` on missing
/// or invalid values.
fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn parse_env_falls_back_on_missing() {
        let value: u64 = parse_env("PLACEFRONT_TEST_UNSET_KEY", 10);
        assert_eq!(value, 10);
    }
}
