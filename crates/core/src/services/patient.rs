use super::{create_entity, delete_entity, get_entity, list_entities, update_entity};
use crate::models::{Id, Patient, PatientRequest, UNASSIGNED_ID};
use crate::patch::{Patch, PatientPatch};
use crate::store::PatientRepository;
use crate::{ClinicError, ClinicResult};
use std::sync::Arc;

/// Patient operations over a [`PatientRepository`].
#[derive(Clone)]
pub struct PatientService {
    store: Arc<dyn PatientRepository>,
}

impl PatientService {
    pub fn new(store: Arc<dyn PatientRepository>) -> Self {
        Self { store }
    }

    pub async fn get_by_id(&self, id: Id) -> ClinicResult<Patient> {
        get_entity(&*self.store, id).await
    }

    pub async fn get_all(&self) -> ClinicResult<Vec<Patient>> {
        list_entities(&*self.store).await
    }

    /// Validates and stores a new patient; first name, last name and national ID are required.
    pub async fn create(&self, request: PatientRequest) -> ClinicResult<Patient> {
        let entity = request.clone().into_patient(UNASSIGNED_ID);
        create_entity(&*self.store, &request, entity).await
    }

    pub async fn update(&self, request: PatientRequest, id: Id) -> ClinicResult<Patient> {
        let entity = request.clone().into_patient(id);
        update_entity(&*self.store, &request, entity).await
    }

    /// Applies the supplied fields of `patch` on top of the stored patient.
    ///
    /// A malformed `fecha_alta` fails with [`ClinicError::Validation`] before anything is written.
    pub async fn patch(&self, id: Id, patch: PatientPatch) -> ClinicResult<Patient> {
        let original = self.get_by_id(id).await?;
        let request = patch.merge(&original)?;
        self.update(request, id).await
    }

    /// Deletes the patient row only. Use [`Clinic::delete_patient`](crate::Clinic::delete_patient)
    /// to remove its appointments as well.
    pub async fn delete(&self, id: Id) -> ClinicResult<()> {
        delete_entity::<Patient, _>(&*self.store, id).await
    }

    /// Resolves a national ID (DNI) to the patient's identity.
    pub async fn id_by_national_id(&self, national_id: &str) -> ClinicResult<Id> {
        self.store.id_by_national_id(national_id).await.map_err(|e| {
            tracing::error!("patient lookup by national ID {} failed: {}", national_id, e);
            ClinicError::from_store(format!("patient with national ID {national_id}"), e)
        })
    }
}
