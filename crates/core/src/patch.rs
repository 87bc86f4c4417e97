//! Partial updates built from discrete field inputs.
//!
//! A patch carries each settable field as an optional piece of text (HTTP query parameters in the
//! REST API). Merging overlays the supplied, non-empty fields onto a full request built from the
//! stored record; the result then goes through the regular full update. A patch with no fields
//! writes the original back unchanged.

use crate::models::{
    Appointment, AppointmentRequest, Dentist, DentistRequest, Patient, PatientRequest,
};
use crate::validation::{parse_date, parse_id, parse_timestamp};
use crate::ClinicResult;
use serde::Deserialize;
use utoipa::IntoParams;

/// Overlay of optional fields onto a stored entity.
pub trait Patch<E> {
    type Request;

    /// Builds the full update request for `original` with this patch applied.
    ///
    /// # Errors
    ///
    /// Returns [`ClinicError::Validation`](crate::ClinicError::Validation) if a supplied field
    /// cannot be parsed.
    fn merge(self, original: &E) -> ClinicResult<Self::Request>;
}

/// Treats absent and blank inputs alike.
fn supplied(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[derive(Clone, Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DentistPatch {
    #[serde(rename = "apellido")]
    pub last_name: Option<String>,
    #[serde(rename = "nombre")]
    pub first_name: Option<String>,
    #[serde(rename = "matricula")]
    pub license_number: Option<String>,
}

impl Patch<Dentist> for DentistPatch {
    type Request = DentistRequest;

    fn merge(self, original: &Dentist) -> ClinicResult<DentistRequest> {
        let mut request = DentistRequest::from(original);
        if let Some(last_name) = supplied(self.last_name) {
            request.last_name = last_name;
        }
        if let Some(first_name) = supplied(self.first_name) {
            request.first_name = first_name;
        }
        if let Some(license_number) = supplied(self.license_number) {
            request.license_number = license_number;
        }
        Ok(request)
    }
}

#[derive(Clone, Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PatientPatch {
    #[serde(rename = "nombre")]
    pub first_name: Option<String>,
    #[serde(rename = "apellido")]
    pub last_name: Option<String>,
    #[serde(rename = "domicilio")]
    pub address: Option<String>,
    #[serde(rename = "dni")]
    pub national_id: Option<String>,
    /// `YYYY-MM-DD`
    #[serde(rename = "fecha_alta")]
    pub admission_date: Option<String>,
}

impl Patch<Patient> for PatientPatch {
    type Request = PatientRequest;

    fn merge(self, original: &Patient) -> ClinicResult<PatientRequest> {
        let mut request = PatientRequest::from(original);
        if let Some(first_name) = supplied(self.first_name) {
            request.first_name = first_name;
        }
        if let Some(last_name) = supplied(self.last_name) {
            request.last_name = last_name;
        }
        if let Some(address) = supplied(self.address) {
            request.address = Some(address);
        }
        if let Some(national_id) = supplied(self.national_id) {
            request.national_id = national_id;
        }
        if let Some(admission_date) = supplied(self.admission_date) {
            request.admission_date = Some(parse_date("fecha_alta", &admission_date)?);
        }
        Ok(request)
    }
}

#[derive(Clone, Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AppointmentPatch {
    #[serde(rename = "id_odontologo")]
    pub dentist_id: Option<String>,
    #[serde(rename = "id_paciente")]
    pub patient_id: Option<String>,
    /// RFC 3339, or `YYYY-MM-DD HH:MM` in UTC
    #[serde(rename = "fecha_hora")]
    pub date_time: Option<String>,
    #[serde(rename = "descripcion")]
    pub description: Option<String>,
}

impl Patch<Appointment> for AppointmentPatch {
    type Request = AppointmentRequest;

    fn merge(self, original: &Appointment) -> ClinicResult<AppointmentRequest> {
        let mut request = AppointmentRequest::from(original);
        if let Some(dentist_id) = supplied(self.dentist_id) {
            request.dentist_id = parse_id("id_odontologo", &dentist_id)?;
        }
        if let Some(patient_id) = supplied(self.patient_id) {
            request.patient_id = parse_id("id_paciente", &patient_id)?;
        }
        if let Some(date_time) = supplied(self.date_time) {
            request.date_time = Some(parse_timestamp("fecha_hora", &date_time)?);
        }
        if let Some(description) = supplied(self.description) {
            request.description = Some(description);
        }
        Ok(request)
    }
}
