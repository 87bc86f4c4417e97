//! HTTP handlers, one module per resource.

pub mod appointments;
pub mod dentists;
pub mod patients;

use crate::AppState;
use api_shared::{HealthRes, HealthService};
use axum::{extract::State, response::Json};

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
///
/// Used for monitoring and load balancer health checks; it needs no API key.
#[axum::debug_handler]
pub async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health())
}
