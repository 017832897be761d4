use serde::Serialize;
use utoipa::ToSchema;

/// Structured error response returned for every non-2xx status.
///
/// Messages are deliberately generic: nothing internal (upstream status
/// codes, bodies, stack detail) and nothing the user submitted is ever
/// echoed back here. Detail goes to the server-side logs only.
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiError {
    /// Machine-readable error code (e.g. "invalid_input", "rate_limited")
    pub error: String,
    /// Short, generic, user-safe description
    pub message: String,
    /// Request ID for tracing and debugging
    pub request_id: String,
}

/// Error codes used across the API
pub mod codes {
    pub const INVALID_INPUT: &str = "invalid_input";
    pub const RATE_LIMITED: &str = "rate_limited";
    pub const UNAVAILABLE: &str = "unavailable";
    pub const INTERNAL_ERROR: &str = "internal_error";
}
