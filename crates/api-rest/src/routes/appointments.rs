//! `/turnos` handlers, including creation and lookup by natural keys.

use crate::error::{parse_path_id, ApiError, ApiJson, ApiQuery};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use clinic_core::{Appointment, AppointmentPatch, AppointmentRequest, NaturalKeyAppointmentRequest};

#[utoipa::path(
    get,
    path = "/api/v1/turnos",
    tag = "turnos",
    responses(
        (status = 200, description = "All appointments", body = [Appointment]),
        (status = 500, description = "Storage unavailable", body = api_shared::ErrorResponse)
    )
)]
#[axum::debug_handler]
pub async fn list_appointments(
    State(state): State<AppState>,
) -> Result<Json<Vec<Appointment>>, ApiError> {
    Ok(Json(state.clinic.appointments().get_all().await?))
}

#[utoipa::path(
    get,
    path = "/api/v1/turnos/{id}",
    tag = "turnos",
    params(("id" = i64, Path, description = "Appointment id")),
    responses(
        (status = 200, description = "Appointment", body = Appointment),
        (status = 400, description = "Non-numeric id", body = api_shared::ErrorResponse),
        (status = 404, description = "No such appointment", body = api_shared::ErrorResponse)
    )
)]
#[axum::debug_handler]
pub async fn get_appointment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Appointment>, ApiError> {
    let id = parse_path_id(&id)?;
    Ok(Json(state.clinic.appointments().get_by_id(id).await?))
}

#[utoipa::path(
    post,
    path = "/api/v1/turnos",
    tag = "turnos",
    request_body = AppointmentRequest,
    responses(
        (status = 201, description = "Appointment created", body = Appointment),
        (status = 400, description = "Missing required fields", body = api_shared::ErrorResponse),
        (status = 403, description = "Missing or invalid API key", body = api_shared::ErrorResponse),
        (status = 500, description = "Insert failed", body = api_shared::ErrorResponse)
    )
)]
/// Creates an appointment from dentist and patient ids.
///
/// The referenced ids are not checked for existence; use `POST /turnos/dni` to book through
/// natural keys.
#[axum::debug_handler]
pub async fn create_appointment(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<AppointmentRequest>,
) -> Result<(StatusCode, Json<Appointment>), ApiError> {
    let created = state.clinic.appointments().create(req).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    post,
    path = "/api/v1/turnos/dni",
    tag = "turnos",
    request_body = NaturalKeyAppointmentRequest,
    responses(
        (status = 201, description = "Appointment created", body = Appointment),
        (status = 400, description = "Missing required fields", body = api_shared::ErrorResponse),
        (status = 403, description = "Missing or invalid API key", body = api_shared::ErrorResponse),
        (status = 404, description = "Unknown national ID or license number", body = api_shared::ErrorResponse)
    )
)]
/// Creates an appointment for the patient with `dni_paciente` and the dentist with
/// `matricula_odontologo`.
#[axum::debug_handler]
pub async fn create_appointment_by_natural_keys(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<NaturalKeyAppointmentRequest>,
) -> Result<(StatusCode, Json<Appointment>), ApiError> {
    let created = state
        .clinic
        .appointments()
        .create_by_natural_keys(req)
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get,
    path = "/api/v1/turnos/dni/{dni}",
    tag = "turnos",
    params(("dni" = String, Path, description = "Patient national ID")),
    responses(
        (status = 200, description = "Appointments of the patient", body = [Appointment]),
        (status = 404, description = "Unknown patient or no appointments", body = api_shared::ErrorResponse)
    )
)]
#[axum::debug_handler]
pub async fn appointments_by_national_id(
    State(state): State<AppState>,
    Path(dni): Path<String>,
) -> Result<Json<Vec<Appointment>>, ApiError> {
    Ok(Json(
        state
            .clinic
            .appointments()
            .by_patient_national_id(&dni)
            .await?,
    ))
}

#[utoipa::path(
    put,
    path = "/api/v1/turnos/{id}",
    tag = "turnos",
    params(("id" = i64, Path, description = "Appointment id")),
    request_body = AppointmentRequest,
    responses(
        (status = 200, description = "Appointment replaced", body = Appointment),
        (status = 400, description = "Bad id or missing fields", body = api_shared::ErrorResponse),
        (status = 404, description = "No such appointment", body = api_shared::ErrorResponse)
    )
)]
#[axum::debug_handler]
pub async fn update_appointment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<AppointmentRequest>,
) -> Result<Json<Appointment>, ApiError> {
    let id = parse_path_id(&id)?;
    Ok(Json(state.clinic.appointments().update(req, id).await?))
}

#[utoipa::path(
    patch,
    path = "/api/v1/turnos/{id}",
    tag = "turnos",
    params(("id" = i64, Path, description = "Appointment id"), AppointmentPatch),
    responses(
        (status = 200, description = "Appointment with the supplied fields changed", body = Appointment),
        (status = 400, description = "Bad id or unparseable field", body = api_shared::ErrorResponse),
        (status = 404, description = "No such appointment", body = api_shared::ErrorResponse)
    )
)]
#[axum::debug_handler]
pub async fn patch_appointment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiQuery(patch): ApiQuery<AppointmentPatch>,
) -> Result<Json<Appointment>, ApiError> {
    let id = parse_path_id(&id)?;
    Ok(Json(state.clinic.appointments().patch(id, patch).await?))
}

#[utoipa::path(
    delete,
    path = "/api/v1/turnos/{id}",
    tag = "turnos",
    params(("id" = i64, Path, description = "Appointment id")),
    responses(
        (status = 204, description = "Appointment deleted"),
        (status = 400, description = "Bad id", body = api_shared::ErrorResponse),
        (status = 404, description = "No such appointment", body = api_shared::ErrorResponse)
    )
)]
#[axum::debug_handler]
pub async fn delete_appointment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_path_id(&id)?;
    state.clinic.appointments().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
