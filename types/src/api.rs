//! Wire payloads for the click service HTTP API.
//!
//! Shared between the server handlers and the client in
//! `clickrush-core` so both sides agree on field names. The click
//! request uses a camelCase `userName` key for compatibility with the
//! original web client.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body of `POST /api/users`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
}

/// A persisted player, as returned by the user endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: u64,
    pub name: String,
    pub total_clicks: u64,
}

/// Body of `POST /api/clicks`.
///
/// One request per physical click. Power-up multipliers are a local
/// display concept and deliberately have no field here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordClickRequest {
    #[serde(rename = "userName")]
    pub user_name: String,
    /// Client-side click time, epoch milliseconds.
    pub timestamp: i64,
}

/// A persisted click event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClickResponse {
    pub id: u64,
    pub user_name: String,
    pub timestamp: DateTime<Utc>,
}

/// One row of `GET /api/leaderboard`, ordered descending by
/// `total_clicks`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub total_clicks: u64,
}

/// Response of `GET /api/stats/{name}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserStats {
    pub name: String,
    pub total_clicks: u64,
    /// 1-based; ties share a rank.
    pub rank: u64,
    pub today_clicks: u64,
    pub created_at: DateTime<Utc>,
}
