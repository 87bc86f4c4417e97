use super::{create_entity, delete_entity, get_entity, list_entities, update_entity};
use crate::models::{Dentist, DentistRequest, Id, UNASSIGNED_ID};
use crate::patch::{DentistPatch, Patch};
use crate::store::DentistRepository;
use crate::{ClinicError, ClinicResult};
use std::sync::Arc;

/// Dentist operations over a [`DentistRepository`].
#[derive(Clone)]
pub struct DentistService {
    store: Arc<dyn DentistRepository>,
}

impl DentistService {
    pub fn new(store: Arc<dyn DentistRepository>) -> Self {
        Self { store }
    }

    pub async fn get_by_id(&self, id: Id) -> ClinicResult<Dentist> {
        get_entity(&*self.store, id).await
    }

    pub async fn get_all(&self) -> ClinicResult<Vec<Dentist>> {
        list_entities(&*self.store).await
    }

    /// Validates and stores a new dentist; storage assigns the identity.
    ///
    /// # Errors
    ///
    /// - [`ClinicError::Validation`] if last name, first name or license number is empty
    ///   (nothing is written)
    /// - [`ClinicError::Execution`] if the insert fails
    pub async fn create(&self, request: DentistRequest) -> ClinicResult<Dentist> {
        let entity = request.clone().into_dentist(UNASSIGNED_ID);
        create_entity(&*self.store, &request, entity).await
    }

    /// Replaces every field of dentist `id`.
    pub async fn update(&self, request: DentistRequest, id: Id) -> ClinicResult<Dentist> {
        let entity = request.clone().into_dentist(id);
        update_entity(&*self.store, &request, entity).await
    }

    /// Applies the supplied fields of `patch` on top of the stored dentist.
    pub async fn patch(&self, id: Id, patch: DentistPatch) -> ClinicResult<Dentist> {
        let original = self.get_by_id(id).await?;
        let request = patch.merge(&original)?;
        self.update(request, id).await
    }

    /// Deletes the dentist row only. Use [`Clinic::delete_dentist`](crate::Clinic::delete_dentist)
    /// to remove its appointments as well.
    pub async fn delete(&self, id: Id) -> ClinicResult<()> {
        delete_entity::<Dentist, _>(&*self.store, id).await
    }

    /// Resolves a license number to the dentist's identity.
    pub async fn id_by_license_number(&self, license_number: &str) -> ClinicResult<Id> {
        self.store
            .id_by_license_number(license_number)
            .await
            .map_err(|e| {
                tracing::error!("dentist lookup by license {} failed: {}", license_number, e);
                ClinicError::from_store(
                    format!("dentist with license number {license_number}"),
                    e,
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, Repository};
    use crate::ErrorKind;

    fn service() -> (DentistService, Arc<MemoryStore<Dentist>>) {
        let store = Arc::new(MemoryStore::<Dentist>::new());
        (DentistService::new(store.clone()), store)
    }

    fn request(license: &str) -> DentistRequest {
        DentistRequest {
            last_name: "Pérez".into(),
            first_name: "Ana".into(),
            license_number: license.into(),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_fresh_identities() {
        let (service, _) = service();
        let first = service.create(request("MP-1")).await.expect("create first");
        let second = service.create(request("MP-2")).await.expect("create second");

        assert_ne!(first.id, 0);
        assert_ne!(second.id, 0);
        assert_ne!(first.id, second.id);
    }

    #[tokio::test]
    async fn test_create_with_empty_license_writes_nothing() {
        let (service, store) = service();
        let err = service
            .create(request(""))
            .await
            .expect_err("empty license should be rejected");

        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(store.get_all().await.expect("list").is_empty());
    }

    #[tokio::test]
    async fn test_update_missing_dentist_is_not_found() {
        let (service, _) = service();
        let err = service
            .update(request("MP-1"), 42)
            .await
            .expect_err("unknown id");
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_patch_without_fields_is_idempotent() {
        let (service, _) = service();
        let created = service.create(request("MP-1")).await.expect("create");

        let patched = service
            .patch(created.id, DentistPatch::default())
            .await
            .expect("empty patch");
        let stored = service.get_by_id(created.id).await.expect("fetch");

        assert_eq!(patched, created);
        assert_eq!(stored, created);
    }

    #[tokio::test]
    async fn test_patch_missing_dentist_is_not_found() {
        let (service, _) = service();
        let err = service
            .patch(9, DentistPatch::default())
            .await
            .expect_err("unknown id");
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_license_lookup() {
        let (service, _) = service();
        let created = service.create(request("MP-77")).await.expect("create");

        assert_eq!(
            service.id_by_license_number("MP-77").await.expect("lookup"),
            created.id
        );
        let err = service
            .id_by_license_number("BAD-LICENSE")
            .await
            .expect_err("unknown license");
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_delete_twice_reports_not_found() {
        let (service, _) = service();
        let created = service.create(request("MP-1")).await.expect("create");

        service.delete(created.id).await.expect("first delete");
        let err = service.delete(created.id).await.expect_err("second delete");
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}
