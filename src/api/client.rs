//! HTTP client for the REST API.

use reqwest::StatusCode;
use reqwest::multipart::{Form, Part};

use super::dto::{ApiErrorBody, RoomListResponse};
use crate::config::ClientConfig;
use crate::domain::ReviewDraft;
use crate::error::ClientError;

/// Thin wrapper over [`reqwest::Client`] carrying the base URL and the
/// optional bearer token.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    auth_token: Option<String>,
}

impl ApiClient {
    /// Builds a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying HTTP client cannot
    /// be constructed.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url: config.api_base_url.clone(),
            auth_token: config.auth_token.clone(),
        })
    }

    /// Fetches the full chat-room list for the current user.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::ConnectionFailed`] when the server is
    /// unreachable, [`ClientError::Rejected`] on a non-success status, or
    /// [`ClientError::Http`] if the body cannot be decoded.
    pub async fn get_chat_rooms(&self) -> Result<RoomListResponse, ClientError> {
        let url = format!("{}/chat-rooms", self.base_url);
        let mut request = self.http.get(&url);
        if let Some(token) = &self.auth_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(map_transport_error)?;
        let response = check_status(response).await?;
        Ok(response.json::<RoomListResponse>().await?)
    }

    /// Submits a review as a multipart form.
    ///
    /// Field names match the backend contract: `place_id`, `rating`,
    /// `comment`, `facilities` (JSON array of ids, omitted when empty) and
    /// one `images[<i>]` part per photo.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotAuthenticated`] without an auth token or
    /// on HTTP 401, [`ClientError::InvalidReview`] when the draft has no
    /// rating, [`ClientError::ConnectionFailed`] when the server is
    /// unreachable, and [`ClientError::Rejected`] on other non-success
    /// statuses.
    pub async fn submit_review(&self, draft: &ReviewDraft) -> Result<(), ClientError> {
        let token = self
            .auth_token
            .as_ref()
            .ok_or(ClientError::NotAuthenticated)?;
        let rating = draft
            .rating
            .ok_or_else(|| ClientError::InvalidReview("a rating is required".to_string()))?;

        let mut form = Form::new()
            .text("place_id", draft.place_id.clone())
            .text("rating", rating.to_string())
            .text("comment", draft.comment.clone());

        if !draft.facilities.is_empty() {
            let ids: Vec<u16> = draft.facilities.iter().map(|f| f.get()).collect();
            form = form.text("facilities", serde_json::to_string(&ids)?);
        }

        for (index, photo) in draft.photos.iter().enumerate() {
            let part = Part::bytes(photo.bytes.clone())
                .file_name(photo.file_name.clone())
                .mime_str(&photo.mime_type)?;
            form = form.part(format!("images[{index}]"), part);
        }

        let url = format!("{}/reviews", self.base_url);
        let response = self
            .http
            .post(&url)
            .bearer_auth(token)
            .multipart(form)
            .send()
            .await
            .map_err(map_transport_error)?;

        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(ClientError::NotAuthenticated);
        }
        let _ = check_status(response).await?;
        Ok(())
    }
}

/// Maps non-success responses to [`ClientError::Rejected`], extracting the
/// message from the API's error body when present.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body: ApiErrorBody = response.json().await.unwrap_or_default();
    Err(ClientError::Rejected {
        status: status.as_u16(),
        message: body.into_message(),
    })
}

/// Distinguishes unreachable-server failures from other HTTP errors.
fn map_transport_error(err: reqwest::Error) -> ClientError {
    if err.is_connect() || err.is_timeout() {
        ClientError::ConnectionFailed(err.to_string())
    } else {
        ClientError::Http(err)
    }
}
