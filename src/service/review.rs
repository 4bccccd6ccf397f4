//! Review submission orchestration.

use std::sync::Arc;

use crate::api::ApiClient;
use crate::domain::ReviewDraft;
use crate::error::ClientError;

/// Validates and submits reviews through the API client.
#[derive(Debug, Clone)]
pub struct ReviewService {
    api: Arc<ApiClient>,
}

impl ReviewService {
    /// Creates a review service over the given API client.
    #[must_use]
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// Validates the draft and submits it.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidReview`] when a precondition fails,
    /// [`ClientError::NotAuthenticated`] without credentials, and the
    /// transport-level variants on HTTP failure.
    pub async fn submit(&self, draft: &ReviewDraft) -> Result<(), ClientError> {
        draft.validate()?;
        self.api.submit_review(draft).await?;
        tracing::info!(
            place_id = %draft.place_id,
            photos = draft.photos.len(),
            "review submitted"
        );
        Ok(())
    }
}
