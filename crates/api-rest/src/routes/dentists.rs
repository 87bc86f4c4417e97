//! `/odontologos` handlers.

use crate::error::{parse_path_id, ApiError, ApiJson, ApiQuery};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use clinic_core::{CascadeReport, Dentist, DentistPatch, DentistRequest};

#[utoipa::path(
    get,
    path = "/api/v1/odontologos",
    tag = "odontologos",
    responses(
        (status = 200, description = "All dentists", body = [Dentist]),
        (status = 500, description = "Storage unavailable", body = api_shared::ErrorResponse)
    )
)]
#[axum::debug_handler]
pub async fn list_dentists(
    State(state): State<AppState>,
) -> Result<Json<Vec<Dentist>>, ApiError> {
    Ok(Json(state.clinic.dentists().get_all().await?))
}

#[utoipa::path(
    get,
    path = "/api/v1/odontologos/{id}",
    tag = "odontologos",
    params(("id" = i64, Path, description = "Dentist id")),
    responses(
        (status = 200, description = "Dentist", body = Dentist),
        (status = 400, description = "Non-numeric id", body = api_shared::ErrorResponse),
        (status = 404, description = "No such dentist", body = api_shared::ErrorResponse)
    )
)]
#[axum::debug_handler]
pub async fn get_dentist(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Dentist>, ApiError> {
    let id = parse_path_id(&id)?;
    Ok(Json(state.clinic.dentists().get_by_id(id).await?))
}

#[utoipa::path(
    post,
    path = "/api/v1/odontologos",
    tag = "odontologos",
    request_body = DentistRequest,
    responses(
        (status = 201, description = "Dentist created", body = Dentist),
        (status = 400, description = "Missing required fields", body = api_shared::ErrorResponse),
        (status = 403, description = "Missing or invalid API key", body = api_shared::ErrorResponse),
        (status = 500, description = "Insert failed", body = api_shared::ErrorResponse)
    )
)]
#[axum::debug_handler]
pub async fn create_dentist(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<DentistRequest>,
) -> Result<(StatusCode, Json<Dentist>), ApiError> {
    let created = state.clinic.dentists().create(req).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    put,
    path = "/api/v1/odontologos/{id}",
    tag = "odontologos",
    params(("id" = i64, Path, description = "Dentist id")),
    request_body = DentistRequest,
    responses(
        (status = 200, description = "Dentist replaced", body = Dentist),
        (status = 400, description = "Bad id or missing fields", body = api_shared::ErrorResponse),
        (status = 404, description = "No such dentist", body = api_shared::ErrorResponse)
    )
)]
#[axum::debug_handler]
pub async fn update_dentist(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<DentistRequest>,
) -> Result<Json<Dentist>, ApiError> {
    let id = parse_path_id(&id)?;
    Ok(Json(state.clinic.dentists().update(req, id).await?))
}

#[utoipa::path(
    patch,
    path = "/api/v1/odontologos/{id}",
    tag = "odontologos",
    params(("id" = i64, Path, description = "Dentist id"), DentistPatch),
    responses(
        (status = 200, description = "Dentist with the supplied fields changed", body = Dentist),
        (status = 400, description = "Bad id", body = api_shared::ErrorResponse),
        (status = 404, description = "No such dentist", body = api_shared::ErrorResponse)
    )
)]
#[axum::debug_handler]
pub async fn patch_dentist(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiQuery(patch): ApiQuery<DentistPatch>,
) -> Result<Json<Dentist>, ApiError> {
    let id = parse_path_id(&id)?;
    Ok(Json(state.clinic.dentists().patch(id, patch).await?))
}

#[utoipa::path(
    delete,
    path = "/api/v1/odontologos/{id}",
    tag = "odontologos",
    params(("id" = i64, Path, description = "Dentist id")),
    responses(
        (status = 200, description = "Dentist and its appointments deleted", body = CascadeReport),
        (status = 400, description = "Bad id", body = api_shared::ErrorResponse),
        (status = 404, description = "No such dentist", body = api_shared::ErrorResponse)
    )
)]
#[axum::debug_handler]
pub async fn delete_dentist(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CascadeReport>, ApiError> {
    let id = parse_path_id(&id)?;
    Ok(Json(state.clinic.delete_dentist(id).await?))
}
