use super::{Entity, Id};
use crate::validation::{RequiredField, Validate};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A patient (paciente). `national_id` (DNI) is the natural key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Patient {
    pub id: Id,
    #[serde(rename = "nombre")]
    pub first_name: String,
    #[serde(rename = "apellido")]
    pub last_name: String,
    #[serde(rename = "domicilio", default)]
    pub address: Option<String>,
    #[serde(rename = "dni")]
    pub national_id: String,
    /// Admission date, `YYYY-MM-DD`.
    #[serde(rename = "fecha_alta", default)]
    pub admission_date: Option<NaiveDate>,
}

/// Create/update payload for a patient.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PatientRequest {
    #[serde(default, rename = "nombre")]
    pub first_name: String,
    #[serde(default, rename = "apellido")]
    pub last_name: String,
    #[serde(default, rename = "domicilio")]
    pub address: Option<String>,
    #[serde(default, rename = "dni")]
    pub national_id: String,
    #[serde(default, rename = "fecha_alta")]
    pub admission_date: Option<NaiveDate>,
}

impl PatientRequest {
    pub fn into_patient(self, id: Id) -> Patient {
        Patient {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            address: self.address,
            national_id: self.national_id,
            admission_date: self.admission_date,
        }
    }
}

impl From<&Patient> for PatientRequest {
    fn from(patient: &Patient) -> Self {
        Self {
            first_name: patient.first_name.clone(),
            last_name: patient.last_name.clone(),
            address: patient.address.clone(),
            national_id: patient.national_id.clone(),
            admission_date: patient.admission_date,
        }
    }
}

impl Validate for PatientRequest {
    fn required_fields(&self) -> Vec<RequiredField<'_>> {
        vec![
            RequiredField::Text("nombre", &self.first_name),
            RequiredField::Text("apellido", &self.last_name),
            RequiredField::Text("dni", &self.national_id),
        ]
    }
}

impl Entity for Patient {
    const NAME: &'static str = "patient";

    fn id(&self) -> Id {
        self.id
    }

    fn set_id(&mut self, id: Id) {
        self.id = id;
    }
}
