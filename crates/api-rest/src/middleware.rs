//! Request middleware: API-key authentication and request logging.

use crate::error::ApiError;
use crate::AppState;
use api_shared::validate_api_key;
use axum::{
    extract::{Request, State},
    http::Method,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::time::Instant;

/// Rejects mutating requests that do not carry the configured API key.
///
/// `GET` and `HEAD` pass through unauthenticated.
pub async fn require_api_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    if request.method() == Method::GET || request.method() == Method::HEAD {
        return next.run(request).await;
    }

    let provided = request
        .headers()
        .get(state.config.api_key_header())
        .and_then(|value| value.to_str().ok());

    match validate_api_key(provided, state.config.api_key()) {
        Ok(()) => next.run(request).await,
        Err(e) => {
            tracing::warn!(
                "{} {} rejected: {}",
                request.method(),
                request.uri().path(),
                e
            );
            ApiError::from(e).into_response()
        }
    }
}

/// Logs method, path, status and elapsed time of every request.
pub async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let started = Instant::now();

    let response = next.run(request).await;

    tracing::info!(
        "{} {} -> {} in {:?}",
        method,
        path,
        response.status().as_u16(),
        started.elapsed()
    );
    response
}
