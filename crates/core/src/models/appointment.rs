use super::{Entity, Id};
use crate::validation::{deserialize_optional_timestamp, RequiredField, Validate};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// An appointment (turno) between a dentist and a patient.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Appointment {
    pub id: Id,
    #[serde(rename = "id_odontologo")]
    pub dentist_id: Id,
    #[serde(rename = "id_paciente")]
    pub patient_id: Id,
    #[serde(rename = "fecha_hora")]
    pub date_time: DateTime<Utc>,
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
}

/// Create/update payload referencing dentist and patient by surrogate ID.
///
/// The referenced IDs are not checked for existence.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AppointmentRequest {
    #[serde(default, rename = "id_odontologo")]
    pub dentist_id: Id,
    #[serde(default, rename = "id_paciente")]
    pub patient_id: Id,
    #[serde(
        default,
        rename = "fecha_hora",
        deserialize_with = "deserialize_optional_timestamp"
    )]
    pub date_time: Option<DateTime<Utc>>,
    #[serde(default, rename = "descripcion")]
    pub description: Option<String>,
}

impl AppointmentRequest {
    /// Builds the entity. Callers validate first, so an absent timestamp never reaches storage.
    pub(crate) fn into_appointment(self, id: Id, date_time: DateTime<Utc>) -> Appointment {
        Appointment {
            id,
            dentist_id: self.dentist_id,
            patient_id: self.patient_id,
            date_time,
            description: self.description,
        }
    }
}

impl From<&Appointment> for AppointmentRequest {
    fn from(appointment: &Appointment) -> Self {
        Self {
            dentist_id: appointment.dentist_id,
            patient_id: appointment.patient_id,
            date_time: Some(appointment.date_time),
            description: appointment.description.clone(),
        }
    }
}

impl Validate for AppointmentRequest {
    fn required_fields(&self) -> Vec<RequiredField<'_>> {
        vec![
            RequiredField::Reference("id_odontologo", self.dentist_id),
            RequiredField::Reference("id_paciente", self.patient_id),
            RequiredField::Timestamp("fecha_hora", self.date_time.as_ref()),
        ]
    }
}

/// Create payload referencing dentist and patient by natural key.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NaturalKeyAppointmentRequest {
    #[serde(default, rename = "matricula_odontologo")]
    pub license_number: String,
    #[serde(default, rename = "dni_paciente")]
    pub national_id: String,
    #[serde(
        default,
        rename = "fecha_hora",
        deserialize_with = "deserialize_optional_timestamp"
    )]
    pub date_time: Option<DateTime<Utc>>,
    #[serde(default, rename = "descripcion")]
    pub description: Option<String>,
}

impl Validate for NaturalKeyAppointmentRequest {
    fn required_fields(&self) -> Vec<RequiredField<'_>> {
        vec![
            RequiredField::Text("matricula_odontologo", &self.license_number),
            RequiredField::Text("dni_paciente", &self.national_id),
            RequiredField::Timestamp("fecha_hora", self.date_time.as_ref()),
        ]
    }
}

impl Entity for Appointment {
    const NAME: &'static str = "appointment";

    fn id(&self) -> Id {
        self.id
    }

    fn set_id(&mut self, id: Id) {
        self.id = id;
    }
}
