//! Custom extractors that convert axum rejections to structured AppError
//! responses.
//!
//! Use `AppJson<T>` as a drop-in replacement for `axum::Json<T>` in handler
//! signatures. Deserialization failures produce a JSON `ApiError` body
//! instead of axum's default plain-text response, with the generic
//! empty-input message — the body detail goes to the logs only.

use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use mindtrack_core::guard::RejectionReason;

use crate::error::AppError;

pub struct AppJson<T>(pub T);

impl<S, T> FromRequest<S> for AppJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(AppJson(value)),
            Err(rejection) => {
                tracing::debug!(detail = %rejection.body_text(), "rejected malformed request body");
                Err(AppError::InputRejected(RejectionReason::Empty))
            }
        }
    }
}
