//! Device payload validation middleware.
//!
//! Wraps every POST/PUT under the protected path prefix. The body is buffered
//! once, checked against the rule catalog, and then either replayed
//! byte-for-byte to the next handler or answered with a 400 naming the
//! offending field. Other methods and paths pass straight through.
//!
//! If the client goes away or the timeout layer fires while the body is being
//! read, axum drops this future: nothing is forwarded and no response is
//! written.

use axum::body::{Body, Bytes};
use axum::extract::{Request, State};
use axum::http::request::Parts;
use axum::http::Method;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use devreg_core::validation::payload::validate_body;
use devreg_core::validation::rules::{Rejection, ValidationOutcome};
use http_body_util::LengthLimitError;

use crate::error::AppError;
use crate::state::AppState;

/// Validate device create/update payloads against the loaded rule catalog.
///
/// Install with `axum::middleware::from_fn_with_state(state, validate_device_payload)`.
pub async fn validate_device_payload(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let settings = &state.config.validation;
    let method = request.method().clone();
    let path = request.uri().path().to_owned();

    if !is_guarded(&method, &path, &settings.protected_prefix) {
        return next.run(request).await;
    }

    tracing::info!(%method, %path, "Payload validation start");

    let body = match BufferedBody::read(request, settings.max_body_bytes).await {
        Ok(body) => body,
        Err(err) => {
            tracing::error!(%method, %path, error = %err, "Failed to buffer request body");
            return err.into_response();
        }
    };

    match validate_body(&state.catalog, &settings.shape, body.bytes()) {
        ValidationOutcome::Accepted => {
            let response = next.run(body.into_request()).await;
            tracing::info!(
                %method,
                %path,
                status = response.status().as_u16(),
                "Payload validation end"
            );
            response
        }
        ValidationOutcome::Rejected(rejection) => {
            log_rejection(&method, &path, &rejection);
            AppError::Rejected(rejection).into_response()
        }
    }
}

/// A request whose body has been read into memory.
///
/// The bytes are cheap to clone and can be inspected any number of times;
/// [`into_request`](Self::into_request) rebuilds the original request with
/// the same body so downstream extractors read it from the start.
struct BufferedBody {
    parts: Parts,
    bytes: Bytes,
}

impl BufferedBody {
    async fn read(request: Request, limit: usize) -> Result<Self, AppError> {
        let (parts, body) = request.into_parts();
        match axum::body::to_bytes(body, limit).await {
            Ok(bytes) => Ok(Self { parts, bytes }),
            Err(err) if exceeds_limit(&err) => Err(AppError::PayloadTooLarge { limit }),
            Err(err) => Err(AppError::Rejected(Rejection::MalformedPayload {
                reason: err.to_string(),
            })),
        }
    }

    fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    fn into_request(self) -> Request {
        Request::from_parts(self.parts, Body::from(self.bytes))
    }
}

fn exceeds_limit(err: &axum::Error) -> bool {
    let mut source: Option<&(dyn std::error::Error + 'static)> = Some(err);
    while let Some(current) = source {
        if current.is::<LengthLimitError>() {
            return true;
        }
        source = current.source();
    }
    false
}

fn log_rejection(method: &Method, path: &str, rejection: &Rejection) {
    match rejection {
        Rejection::MissingField { param_name } => {
            tracing::warn!(%method, path, field = %param_name, "Rejected payload: missing field");
        }
        Rejection::PatternMismatch { param_name, value } => {
            tracing::warn!(
                %method,
                path,
                field = %param_name,
                value = %value,
                "Rejected payload: value does not match pattern"
            );
        }
        Rejection::MalformedPayload { reason } => {
            tracing::error!(%method, path, reason = %reason, "Rejected payload: invalid JSON");
        }
    }
}

/// Whether a request is subject to payload validation.
fn is_guarded(method: &Method, path: &str, prefix: &str) -> bool {
    (method == Method::POST || method == Method::PUT) && is_under_prefix(path, prefix)
}

/// Segment-aware prefix test: `/api/devices` covers `/api/devices` and
/// `/api/devices/7`, but not `/api/devicesX`.
fn is_under_prefix(path: &str, prefix: &str) -> bool {
    let prefix = prefix.trim_end_matches('/');
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}
