//! # API REST
//!
//! REST API implementation for the dental clinic service.
//!
//! Handles:
//! - HTTP endpoints with axum, under `/api/v1`
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON bodies, CORS, API-key checks, error responses)
//!
//! Uses `api-shared` for common types and utilities and `clinic-core` for all domain logic.

#![warn(rust_2018_idioms)]

pub mod error;
pub mod middleware;
pub mod routes;

use axum::{middleware as axum_middleware, routing::get, routing::post, Router};
use clinic_core::constants::API_BASE_PATH;
use clinic_core::{Clinic, ClinicConfig};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use routes::{appointments, dentists, patients};

/// Application state shared across REST API handlers.
#[derive(Clone)]
pub struct AppState {
    pub clinic: Clinic,
    pub config: Arc<ClinicConfig>,
}

impl AppState {
    pub fn new(clinic: Clinic, config: ClinicConfig) -> Self {
        Self {
            clinic,
            config: Arc::new(config),
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        routes::health,
        dentists::list_dentists,
        dentists::get_dentist,
        dentists::create_dentist,
        dentists::update_dentist,
        dentists::patch_dentist,
        dentists::delete_dentist,
        patients::list_patients,
        patients::get_patient,
        patients::create_patient,
        patients::update_patient,
        patients::patch_patient,
        patients::delete_patient,
        appointments::list_appointments,
        appointments::get_appointment,
        appointments::create_appointment,
        appointments::create_appointment_by_natural_keys,
        appointments::appointments_by_national_id,
        appointments::update_appointment,
        appointments::patch_appointment,
        appointments::delete_appointment,
    ),
    components(schemas(
        api_shared::HealthRes,
        api_shared::ErrorResponse,
        clinic_core::Dentist,
        clinic_core::DentistRequest,
        clinic_core::Patient,
        clinic_core::PatientRequest,
        clinic_core::Appointment,
        clinic_core::AppointmentRequest,
        clinic_core::NaturalKeyAppointmentRequest,
        clinic_core::CascadeReport,
    )),
    tags(
        (name = "odontologos", description = "Dentists"),
        (name = "pacientes", description = "Patients"),
        (name = "turnos", description = "Appointments")
    )
)]
pub struct ApiDoc;

/// Builds the full application router.
///
/// Routes under [`API_BASE_PATH`] require the API key for every method except `GET`/`HEAD`;
/// `/health` and the Swagger UI are open.
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route(
            "/odontologos",
            get(dentists::list_dentists).post(dentists::create_dentist),
        )
        .route(
            "/odontologos/:id",
            get(dentists::get_dentist)
                .put(dentists::update_dentist)
                .patch(dentists::patch_dentist)
                .delete(dentists::delete_dentist),
        )
        .route(
            "/pacientes",
            get(patients::list_patients).post(patients::create_patient),
        )
        .route(
            "/pacientes/:id",
            get(patients::get_patient)
                .put(patients::update_patient)
                .patch(patients::patch_patient)
                .delete(patients::delete_patient),
        )
        .route(
            "/turnos",
            get(appointments::list_appointments).post(appointments::create_appointment),
        )
        .route(
            "/turnos/dni",
            post(appointments::create_appointment_by_natural_keys),
        )
        .route(
            "/turnos/dni/:dni",
            get(appointments::appointments_by_national_id),
        )
        .route(
            "/turnos/:id",
            get(appointments::get_appointment)
                .put(appointments::update_appointment)
                .patch(appointments::patch_appointment)
                .delete(appointments::delete_appointment),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::require_api_key,
        ));

    Router::new()
        .route("/health", get(routes::health))
        .nest(API_BASE_PATH, api)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(axum_middleware::from_fn(middleware::log_requests))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
