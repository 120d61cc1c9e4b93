use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::{DateTime, TimeZone, Utc};
use clickrush_types::{
    ClickResponse, CreateUserRequest, LeaderboardEntry, RecordClickRequest, UserResponse,
    UserStats,
};
use serde::Deserialize;
use tracing::debug;

use crate::error::ApiError;
use crate::state::AppState;
use crate::store::ClickRejection;

#[derive(Deserialize)]
pub struct LimitQuery {
    limit: Option<usize>,
}

/// Idempotent create-or-return: a duplicate name yields the existing
/// user so a returning player can start a session without errors.
pub async fn create_user_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let name = payload.name.trim();
    if name.is_empty() {
        return Err(ApiError::EmptyName);
    }
    let user = state.store.write().await.create_user(name, Utc::now());
    debug!(name, id = user.id, "user ensured");
    Ok(Json(user))
}

pub async fn list_users_handler(State(state): State<Arc<AppState>>) -> Json<Vec<UserResponse>> {
    Json(state.store.read().await.users())
}

/// Record one physical click. 429 carries the anti-cheat message; the
/// client treats that as non-fatal and keeps its local count.
pub async fn record_click_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RecordClickRequest>,
) -> Result<Json<ClickResponse>, ApiError> {
    let now = Utc::now();
    let clicked_at = epoch_ms_to_utc(payload.timestamp).unwrap_or(now);
    let result = state
        .store
        .write()
        .await
        .record_click(&payload.user_name, clicked_at, now);
    match result {
        Ok(click) => Ok(Json(click)),
        Err(ClickRejection::UnknownUser) => Err(ApiError::UserNotFound),
        Err(ClickRejection::RateLimited) => {
            debug!(user = %payload.user_name, "click rate limited");
            Err(ApiError::RateLimited)
        }
    }
}

pub async fn list_clicks_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LimitQuery>,
) -> Json<Vec<ClickResponse>> {
    let limit = query.limit.unwrap_or(100);
    Json(state.store.read().await.recent_clicks(limit))
}

pub async fn leaderboard_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LimitQuery>,
) -> Json<Vec<LeaderboardEntry>> {
    let limit = query.limit.unwrap_or(state.config.leaderboard_default_limit);
    Json(state.store.read().await.leaderboard(limit))
}

pub async fn stats_handler(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<UserStats>, ApiError> {
    state
        .store
        .read()
        .await
        .stats(&name, Utc::now())
        .map(Json)
        .ok_or(ApiError::UserNotFound)
}

fn epoch_ms_to_utc(ms: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_millis_opt(ms).single()
}
