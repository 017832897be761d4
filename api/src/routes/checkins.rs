use axum::extract::State;
use axum::response::IntoResponse;
use axum::{Json, Router, routing::post};
use mindtrack_core::error::ApiError;
use mindtrack_core::mood::MoodAnalysis;
use serde::Deserialize;

use crate::error::AppError;
use crate::extract::AppJson;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/v1/checkins", post(create_check_in))
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct CheckInRequest {
    /// Free text about the user's emotional state, at most 2000 characters
    #[serde(default)]
    pub text: String,
}

/// Analyze a check-in and append the result to the local history.
///
/// A rejected or failed check-in leaves prior history untouched — no
/// partial entry is ever persisted.
#[utoipa::path(
    post,
    path = "/v1/checkins",
    request_body = CheckInRequest,
    responses(
        (status = 200, description = "Structured mood analysis", body = MoodAnalysis),
        (status = 400, description = "Empty, over-long, or suspicious input", body = ApiError),
        (status = 429, description = "Upstream rate limit — retry after a delay", body = ApiError),
        (status = 503, description = "Analysis backend unavailable", body = ApiError),
        (status = 500, description = "Unexpected failure", body = ApiError)
    ),
    tag = "checkins"
)]
pub async fn create_check_in(
    State(state): State<AppState>,
    AppJson(request): AppJson<CheckInRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut analysis = state.service.analyze(&request.text).await?;
    // Attached for local display only; not part of the analysis contract.
    analysis.user_text = Some(request.text.trim().to_string());

    let mut history = state.history.lock().await;
    if let Err(err) = history.append(analysis.clone()) {
        // The entry is still returned; the in-memory log holds it.
        tracing::warn!(error = %err, "failed to persist check-in history");
    }

    Ok(Json(analysis))
}
