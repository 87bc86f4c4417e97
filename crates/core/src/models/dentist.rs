use super::{Entity, Id};
use crate::validation::{RequiredField, Validate};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A dentist (odontólogo). `license_number` is the natural key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Dentist {
    pub id: Id,
    #[serde(rename = "apellido")]
    pub last_name: String,
    #[serde(rename = "nombre")]
    pub first_name: String,
    #[serde(rename = "matricula")]
    pub license_number: String,
}

/// Create/update payload for a dentist.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DentistRequest {
    #[serde(default, rename = "apellido")]
    pub last_name: String,
    #[serde(default, rename = "nombre")]
    pub first_name: String,
    #[serde(default, rename = "matricula")]
    pub license_number: String,
}

impl DentistRequest {
    pub fn into_dentist(self, id: Id) -> Dentist {
        Dentist {
            id,
            last_name: self.last_name,
            first_name: self.first_name,
            license_number: self.license_number,
        }
    }
}

impl From<&Dentist> for DentistRequest {
    fn from(dentist: &Dentist) -> Self {
        Self {
            last_name: dentist.last_name.clone(),
            first_name: dentist.first_name.clone(),
            license_number: dentist.license_number.clone(),
        }
    }
}

impl Validate for DentistRequest {
    fn required_fields(&self) -> Vec<RequiredField<'_>> {
        vec![
            RequiredField::Text("apellido", &self.last_name),
            RequiredField::Text("nombre", &self.first_name),
            RequiredField::Text("matricula", &self.license_number),
        ]
    }
}

impl Entity for Dentist {
    const NAME: &'static str = "dentist";

    fn id(&self) -> Id {
        self.id
    }

    fn set_id(&mut self, id: Id) {
        self.id = id;
    }
}
