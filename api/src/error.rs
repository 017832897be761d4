use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use mindtrack_core::error::{self, ApiError};
use mindtrack_core::guard::RejectionReason;

use crate::gateway::GatewayError;

/// Internal error type that converts to structured API responses.
///
/// Client-visible messages are always generic; anything internal (upstream
/// bodies, status codes, configuration state) stays in the logs.
#[derive(Debug)]
pub enum AppError {
    /// Input rejected by the guard (400)
    InputRejected(RejectionReason),
    /// Upstream quota exhausted — user-retryable (429)
    UpstreamRateLimited,
    /// Upstream outage or misconfiguration — retry later (503)
    UpstreamUnavailable,
    /// Catch-all (500)
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let request_id = uuid::Uuid::now_v7().to_string();

        let (status, code, message) = match self {
            AppError::InputRejected(reason) => {
                (StatusCode::BAD_REQUEST, error::codes::INVALID_INPUT, reason.to_string())
            }
            AppError::UpstreamRateLimited => (
                StatusCode::TOO_MANY_REQUESTS,
                error::codes::RATE_LIMITED,
                "Too many requests. Please wait a moment and try again.".to_string(),
            ),
            AppError::UpstreamUnavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                error::codes::UNAVAILABLE,
                "Service temporarily unavailable. Please try again later.".to_string(),
            ),
            AppError::Internal(detail) => {
                tracing::error!(detail = %detail, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    error::codes::INTERNAL_ERROR,
                    "An unexpected error occurred. Please try again later.".to_string(),
                )
            }
        };

        (
            status,
            Json(ApiError {
                error: code.to_string(),
                message,
                request_id,
            }),
        )
            .into_response()
    }
}

impl From<RejectionReason> for AppError {
    fn from(reason: RejectionReason) -> Self {
        AppError::InputRejected(reason)
    }
}

impl From<GatewayError> for AppError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::RateLimited => AppError::UpstreamRateLimited,
            GatewayError::Unavailable => AppError::UpstreamUnavailable,
            // The original flow treated a missing reply as its catch-all.
            GatewayError::EmptyReply => AppError::Internal("empty reply from model".to_string()),
        }
    }
}
