//! Entity services.
//!
//! Each service validates requests, translates them into canonical entities and delegates to its
//! repository. Storage errors are logged here and converted into [`ClinicError`]s; nothing is
//! retried or cached.
//!
//! Composition order is fixed: repositories → [`DentistService`] and [`PatientService`] →
//! [`AppointmentService`], which resolves natural keys through the other two.

use crate::models::{Entity, Id};
use crate::store::Repository;
use crate::validation::Validate;
use crate::{ClinicError, ClinicResult};

pub mod appointment;
pub mod dentist;
pub mod patient;

pub use appointment::AppointmentService;
pub use dentist::DentistService;
pub use patient::PatientService;

// ============================================================================
// SHARED CRUD PLUMBING
// ============================================================================

async fn get_entity<E, R>(repo: &R, id: Id) -> ClinicResult<E>
where
    E: Entity,
    R: Repository<E> + ?Sized,
{
    repo.get_by_id(id).await.map_err(|e| {
        tracing::error!("get {} {} failed: {}", E::NAME, id, e);
        ClinicError::from_store(format!("{} {}", E::NAME, id), e)
    })
}

/// Zero rows is an empty vector; any storage failure is `StorageUnavailable`.
async fn list_entities<E, R>(repo: &R) -> ClinicResult<Vec<E>>
where
    E: Entity,
    R: Repository<E> + ?Sized,
{
    repo.get_all().await.map_err(|e| {
        tracing::error!("list {} records failed: {}", E::NAME, e);
        ClinicError::StorageUnavailable(e.to_string())
    })
}

async fn create_entity<E, R>(repo: &R, request: &impl Validate, entity: E) -> ClinicResult<E>
where
    E: Entity,
    R: Repository<E> + ?Sized,
{
    if let Err(e) = request.validate() {
        tracing::warn!("rejected {} create: {}", E::NAME, e);
        return Err(e);
    }

    let created = repo.create(entity).await.map_err(|e| {
        tracing::error!("create {} failed: {}", E::NAME, e);
        ClinicError::Execution(format!("create {}: {}", E::NAME, e))
    })?;
    tracing::info!("created {} {}", E::NAME, created.id());
    Ok(created)
}

async fn update_entity<E, R>(repo: &R, request: &impl Validate, entity: E) -> ClinicResult<E>
where
    E: Entity,
    R: Repository<E> + ?Sized,
{
    let id = entity.id();
    if let Err(e) = request.validate() {
        tracing::warn!("rejected {} {} update: {}", E::NAME, id, e);
        return Err(e);
    }

    let updated = repo.update(entity).await.map_err(|e| {
        tracing::error!("update {} {} failed: {}", E::NAME, id, e);
        ClinicError::from_store(format!("{} {}", E::NAME, id), e)
    })?;
    tracing::info!("updated {} {}", E::NAME, id);
    Ok(updated)
}

async fn delete_entity<E, R>(repo: &R, id: Id) -> ClinicResult<()>
where
    E: Entity,
    R: Repository<E> + ?Sized,
{
    repo.delete(id).await.map_err(|e| {
        tracing::error!("delete {} {} failed: {}", E::NAME, id, e);
        ClinicError::from_store(format!("{} {}", E::NAME, id), e)
    })?;
    tracing::info!("deleted {} {}", E::NAME, id);
    Ok(())
}
