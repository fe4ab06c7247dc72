use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;

use crate::models::entry::{CreateEntryRequest, MoodEntry};

/// Bearer token of a signed-in user, as handed out by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub user_id: String,
    pub token: String,
}

/// Result of asking the identity provider who is signed in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    Authenticated(Credentials),
    Unauthenticated,
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum SubmitError {
    #[error("{message}")]
    Validation {
        message: String,
        missing_fields: Vec<String>,
    },

    #[error("Your session has expired, please sign in again")]
    Unauthorized,

    #[error("Not allowed to write entries for this user")]
    Forbidden,

    #[error("Failed to save entry.")]
    Storage,

    #[error("Could not reach the journal service: {0}")]
    Network(String),
}

#[async_trait]
pub trait EntrySubmitter: Send + Sync {
    async fn submit(
        &self,
        credentials: &Credentials,
        entry: &CreateEntryRequest,
    ) -> Result<MoodEntry, SubmitError>;
}

/// Submits entries to `POST {base_url}/api/entries`.
#[derive(Clone)]
pub struct HttpEntryClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpEntryClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl EntrySubmitter for HttpEntryClient {
    async fn submit(
        &self,
        credentials: &Credentials,
        entry: &CreateEntryRequest,
    ) -> Result<MoodEntry, SubmitError> {
        let response = self
            .http
            .post(format!("{}/api/entries", self.base_url))
            .bearer_auth(&credentials.token)
            .json(entry)
            .send()
            .await
            .map_err(|e| SubmitError::Network(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return response
                .json::<MoodEntry>()
                .await
                .map_err(|e| SubmitError::Network(e.to_string()));
        }

        let body = response.text().await.unwrap_or_default();
        tracing::debug!(status = status.as_u16(), body = %body, "Entry submission failed");
        Err(classify_failure(status, &body))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    error: String,
    #[serde(default)]
    missing_fields: Vec<String>,
}

/// Map a non-success response back onto [`SubmitError`].
///
/// Any 4xx other than 401/403 is something the user can fix by editing the
/// entry; everything else is reported generically.
pub fn classify_failure(status: StatusCode, body: &str) -> SubmitError {
    match status {
        StatusCode::UNAUTHORIZED => SubmitError::Unauthorized,
        StatusCode::FORBIDDEN => SubmitError::Forbidden,
        s if s.is_client_error() => match serde_json::from_str::<ErrorBody>(body) {
            Ok(parsed) => SubmitError::Validation {
                message: parsed.error,
                missing_fields: parsed.missing_fields,
            },
            Err(_) => SubmitError::Validation {
                message: if s == StatusCode::PAYLOAD_TOO_LARGE {
                    "Entry is too large, try a smaller image".into()
                } else {
                    "Invalid entry".into()
                },
                missing_fields: Vec::new(),
            },
        },
        _ => SubmitError::Storage,
    }
}
