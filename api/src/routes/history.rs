use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Json, Router, routing::get};
use mindtrack_core::error::ApiError;
use mindtrack_core::mood::MoodHistory;
use mindtrack_core::trend::TrendBucket;
use serde::Serialize;

use crate::error::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/history", get(list_history).delete(clear_history))
        .route("/v1/history/trend", get(get_trend))
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct TrendResponse {
    /// The 7 calendar days ending today, oldest first
    pub days: Vec<TrendBucket>,
}

/// Past check-ins, newest first, at most 30.
#[utoipa::path(
    get,
    path = "/v1/history",
    responses(
        (status = 200, description = "The check-in log", body = MoodHistory)
    ),
    tag = "history"
)]
pub async fn list_history(State(state): State<AppState>) -> impl IntoResponse {
    let history = state.history.lock().await;
    Json(MoodHistory {
        entries: history.entries().to_vec(),
    })
}

/// The 7-day stress trend, one bucket per local calendar day.
#[utoipa::path(
    get,
    path = "/v1/history/trend",
    responses(
        (status = 200, description = "Seven daily buckets, oldest first", body = TrendResponse)
    ),
    tag = "history"
)]
pub async fn get_trend(State(state): State<AppState>) -> impl IntoResponse {
    let history = state.history.lock().await;
    Json(TrendResponse {
        days: history.last_7_days(),
    })
}

/// Discard all entries and the persisted record in one step.
#[utoipa::path(
    delete,
    path = "/v1/history",
    responses(
        (status = 204, description = "History cleared"),
        (status = 500, description = "Clearing the persisted log failed", body = ApiError)
    ),
    tag = "history"
)]
pub async fn clear_history(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let mut history = state.history.lock().await;
    history
        .clear()
        .map_err(|err| AppError::Internal(format!("failed to clear history: {err}")))?;
    Ok(StatusCode::NO_CONTENT)
}
