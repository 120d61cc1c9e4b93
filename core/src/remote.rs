//! HTTP client for the remote click service.
//!
//! All calls here are best-effort bookkeeping: the driving loop spawns
//! them fire-and-forget and the session state machine never waits on a
//! response. A rate-limited click is a normal outcome, not an error -
//! the caller surfaces the message and the local count stands.

use clickrush_types::{
    ClickResponse, CreateUserRequest, LeaderboardEntry, RecordClickRequest, UserStats,
};
use reqwest::StatusCode;
use thiserror::Error;

/// Failures talking to the remote service. Never fatal to the session;
/// callers log at `warn` and move on.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },
}

/// Outcome of a `record_click` call. The rate-limit signal carries the
/// server's human-readable reason.
#[derive(Debug)]
pub enum RecordOutcome {
    Recorded(ClickResponse),
    RateLimited(String),
}

/// Thin client over the service's HTTP+JSON contract.
#[derive(Debug, Clone)]
pub struct HttpClickService {
    client: reqwest::Client,
    base_url: String,
}

impl HttpClickService {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Ensure the player exists. Idempotent on the server side: posting
    /// an existing name returns the existing user.
    pub async fn create_user(&self, name: &str) -> Result<(), RemoteError> {
        let response = self
            .client
            .post(format!("{}/api/users", self.base_url))
            .json(&CreateUserRequest {
                name: name.to_string(),
            })
            .send()
            .await?;
        if response.status().is_success() {
            return Ok(());
        }
        Err(unexpected(response).await)
    }

    /// Record one physical click. A 429 is returned as
    /// `RecordOutcome::RateLimited` rather than an error.
    pub async fn record_click(
        &self,
        record: &RecordClickRequest,
    ) -> Result<RecordOutcome, RemoteError> {
        let response = self
            .client
            .post(format!("{}/api/clicks", self.base_url))
            .json(record)
            .send()
            .await?;
        if response.status() == StatusCode::TOO_MANY_REQUESTS {
            let message = response.text().await.unwrap_or_default();
            return Ok(RecordOutcome::RateLimited(message));
        }
        if response.status().is_success() {
            return Ok(RecordOutcome::Recorded(response.json().await?));
        }
        Err(unexpected(response).await)
    }

    /// Fetch the top players, descending by total clicks. An empty
    /// board is a normal result.
    pub async fn leaderboard(&self, limit: usize) -> Result<Vec<LeaderboardEntry>, RemoteError> {
        let response = self
            .client
            .get(format!("{}/api/leaderboard", self.base_url))
            .query(&[("limit", limit)])
            .send()
            .await?;
        if response.status().is_success() {
            return Ok(response.json().await?);
        }
        Err(unexpected(response).await)
    }

    pub async fn user_stats(&self, name: &str) -> Result<UserStats, RemoteError> {
        let response = self
            .client
            .get(format!("{}/api/stats/{name}", self.base_url))
            .send()
            .await?;
        if response.status().is_success() {
            return Ok(response.json().await?);
        }
        Err(unexpected(response).await)
    }
}

async fn unexpected(response: reqwest::Response) -> RemoteError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    RemoteError::UnexpectedStatus { status, body }
}
