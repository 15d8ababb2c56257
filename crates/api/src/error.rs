use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use devreg_core::error::CoreError;
use devreg_core::validation::rules::Rejection;
use serde_json::json;

/// Application-level error type for HTTP handlers and middleware.
///
/// Wraps [`CoreError`] for domain errors and [`Rejection`] for payloads the
/// validation middleware refuses. Implements [`IntoResponse`] to produce
/// consistent `{ "error", "code" }` JSON bodies.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `devreg_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A payload refused by the validation rules.
    #[error(transparent)]
    Rejected(#[from] Rejection),

    /// Request body exceeded the buffering limit.
    #[error("Request body exceeds {limit} bytes")]
    PayloadTooLarge { limit: usize },
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
            },

            AppError::Rejected(rejection) => {
                (StatusCode::BAD_REQUEST, rejection.code(), rejection.to_string())
            }

            AppError::PayloadTooLarge { .. } => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "PAYLOAD_TOO_LARGE",
                self.to_string(),
            ),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
