//! Client error types.
//!
//! [`ClientError`] is the central error type for the crate. No failure in
//! the live-sync core is fatal: loader and updater log and degrade, so
//! these variants surface only from the explicit request paths (room fetch
//! and review submission).

/// Client-side error enum covering validation, auth, and transport failures.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// No auth token is available; the user must log in first.
    #[error("not authenticated")]
    NotAuthenticated,

    /// The review draft failed a submission precondition.
    #[error("invalid review: {0}")]
    InvalidReview(String),

    /// The server could not be reached (connect or timeout failure).
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// The server answered with a non-success status.
    #[error("request rejected ({status}): {message}")]
    Rejected {
        /// HTTP status code returned by the server.
        status: u16,
        /// Message extracted from the response body, or a generic fallback.
        message: String,
    },

    /// Any other HTTP-level failure (e.g. response body decoding).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization failure while building a request.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    /// Returns `true` for failures caused by missing or rejected credentials.
    #[must_use]
    pub fn is_auth(&self) -> bool {
        matches!(
            self,
            Self::NotAuthenticated | Self::Rejected { status: 401, .. }
        )
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let err = ClientError::Rejected {
            status: 422,
            message: "rating out of range".to_string(),
        };
        assert_eq!(err.to_string(), "request rejected (422): rating out of range");

        let err = ClientError::InvalidReview("a rating is required".to_string());
        assert!(err.to_string().contains("a rating is required"));
    }

    #[test]
    fn auth_classification() {
        assert!(ClientError::NotAuthenticated.is_auth());
        assert!(
            ClientError::Rejected {
                status: 401,
                message: String::new()
            }
            .is_auth()
        );
        assert!(
            !ClientError::Rejected {
                status: 500,
                message: String::new()
            }
            .is_auth()
        );
        assert!(!ClientError::ConnectionFailed("refused".to_string()).is_auth());
    }
}
