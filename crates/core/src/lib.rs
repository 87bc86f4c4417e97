//! # Clinic Core
//!
//! Core business logic for the dental clinic records service.
//!
//! This crate contains the domain operations for dentists, patients and appointments:
//! - validation of create/update requests and partial updates from discrete fields
//! - appointment creation from natural keys (license number, national ID)
//! - best-effort cascading deletes through the [`Clinic`] facade
//! - storage contracts with in-memory and MySQL implementations
//!
//! **No API concerns**: Authentication, HTTP routing and response shaping belong in `api-rest`
//! or `api-shared`.

pub mod clinic;
pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod patch;
pub mod services;
pub mod store;
pub mod validation;

pub use clinic::{CascadeReport, Clinic};
pub use config::ClinicConfig;
pub use error::{ClinicError, ClinicResult, ErrorKind, StoreError, StoreResult};
pub use models::{
    Appointment, AppointmentRequest, Dentist, DentistRequest, Id, NaturalKeyAppointmentRequest,
    Patient, PatientRequest,
};
pub use patch::{AppointmentPatch, DentistPatch, Patch, PatientPatch};
pub use services::{AppointmentService, DentistService, PatientService};
