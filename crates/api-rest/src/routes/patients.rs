//! `/pacientes` handlers.

use crate::error::{parse_path_id, ApiError, ApiJson, ApiQuery};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use clinic_core::{CascadeReport, Patient, PatientPatch, PatientRequest};

#[utoipa::path(
    get,
    path = "/api/v1/pacientes",
    tag = "pacientes",
    responses(
        (status = 200, description = "All patients", body = [Patient]),
        (status = 500, description = "Storage unavailable", body = api_shared::ErrorResponse)
    )
)]
#[axum::debug_handler]
pub async fn list_patients(
    State(state): State<AppState>,
) -> Result<Json<Vec<Patient>>, ApiError> {
    Ok(Json(state.clinic.patients().get_all().await?))
}

#[utoipa::path(
    get,
    path = "/api/v1/pacientes/{id}",
    tag = "pacientes",
    params(("id" = i64, Path, description = "Patient id")),
    responses(
        (status = 200, description = "Patient", body = Patient),
        (status = 400, description = "Non-numeric id", body = api_shared::ErrorResponse),
        (status = 404, description = "No such patient", body = api_shared::ErrorResponse)
    )
)]
#[axum::debug_handler]
pub async fn get_patient(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Patient>, ApiError> {
    let id = parse_path_id(&id)?;
    Ok(Json(state.clinic.patients().get_by_id(id).await?))
}

#[utoipa::path(
    post,
    path = "/api/v1/pacientes",
    tag = "pacientes",
    request_body = PatientRequest,
    responses(
        (status = 201, description = "Patient created", body = Patient),
        (status = 400, description = "Missing required fields", body = api_shared::ErrorResponse),
        (status = 403, description = "Missing or invalid API key", body = api_shared::ErrorResponse),
        (status = 500, description = "Insert failed", body = api_shared::ErrorResponse)
    )
)]
#[axum::debug_handler]
pub async fn create_patient(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<PatientRequest>,
) -> Result<(StatusCode, Json<Patient>), ApiError> {
    let created = state.clinic.patients().create(req).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    put,
    path = "/api/v1/pacientes/{id}",
    tag = "pacientes",
    params(("id" = i64, Path, description = "Patient id")),
    request_body = PatientRequest,
    responses(
        (status = 200, description = "Patient replaced", body = Patient),
        (status = 400, description = "Bad id or missing fields", body = api_shared::ErrorResponse),
        (status = 404, description = "No such patient", body = api_shared::ErrorResponse)
    )
)]
#[axum::debug_handler]
pub async fn update_patient(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<PatientRequest>,
) -> Result<Json<Patient>, ApiError> {
    let id = parse_path_id(&id)?;
    Ok(Json(state.clinic.patients().update(req, id).await?))
}

#[utoipa::path(
    patch,
    path = "/api/v1/pacientes/{id}",
    tag = "pacientes",
    params(("id" = i64, Path, description = "Patient id"), PatientPatch),
    responses(
        (status = 200, description = "Patient with the supplied fields changed", body = Patient),
        (status = 400, description = "Bad id or unparseable fecha_alta", body = api_shared::ErrorResponse),
        (status = 404, description = "No such patient", body = api_shared::ErrorResponse)
    )
)]
#[axum::debug_handler]
pub async fn patch_patient(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiQuery(patch): ApiQuery<PatientPatch>,
) -> Result<Json<Patient>, ApiError> {
    let id = parse_path_id(&id)?;
    Ok(Json(state.clinic.patients().patch(id, patch).await?))
}

#[utoipa::path(
    delete,
    path = "/api/v1/pacientes/{id}",
    tag = "pacientes",
    params(("id" = i64, Path, description = "Patient id")),
    responses(
        (status = 200, description = "Patient and its appointments deleted", body = CascadeReport),
        (status = 400, description = "Bad id", body = api_shared::ErrorResponse),
        (status = 404, description = "No such patient", body = api_shared::ErrorResponse)
    )
)]
#[axum::debug_handler]
pub async fn delete_patient(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CascadeReport>, ApiError> {
    let id = parse_path_id(&id)?;
    Ok(Json(state.clinic.delete_patient(id).await?))
}
