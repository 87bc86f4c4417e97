//! Storage collaborator contracts.
//!
//! Each entity is persisted through a [`Repository`], extended with the natural-key and
//! cross-reference lookups the services need. Two implementations are provided:
//!
//! - [`MemoryStore`]: process-local storage, used for development and tests
//! - [`MySqlRepository`]: MySQL storage through a `sqlx` connection pool
//!
//! Implementations must report zero matched rows on update/delete as [`StoreError::NotFound`]
//! and an empty table as `Ok(vec![])`, keeping absence distinct from failure.
//!
//! [`StoreError::NotFound`]: crate::StoreError::NotFound

use crate::models::{Appointment, Dentist, Entity, Id, Patient};
use crate::StoreResult;
use async_trait::async_trait;

pub mod memory;
pub mod mysql;
pub mod queries;

pub use memory::MemoryStore;
pub use mysql::MySqlRepository;

/// CRUD-by-identity persistence for one entity type.
#[async_trait]
pub trait Repository<E: Entity>: Send + Sync {
    /// Inserts `entity` and returns it with the identity assigned by storage.
    async fn create(&self, entity: E) -> StoreResult<E>;

    async fn get_by_id(&self, id: Id) -> StoreResult<E>;

    async fn get_all(&self) -> StoreResult<Vec<E>>;

    /// Replaces the row identified by `entity.id()`.
    async fn update(&self, entity: E) -> StoreResult<E>;

    async fn delete(&self, id: Id) -> StoreResult<()>;
}

#[async_trait]
pub trait DentistRepository: Repository<Dentist> {
    async fn id_by_license_number(&self, license_number: &str) -> StoreResult<Id>;
}

#[async_trait]
pub trait PatientRepository: Repository<Patient> {
    async fn id_by_national_id(&self, national_id: &str) -> StoreResult<Id>;
}

#[async_trait]
pub trait AppointmentRepository: Repository<Appointment> {
    async fn by_dentist_id(&self, dentist_id: Id) -> StoreResult<Vec<Appointment>>;

    async fn by_patient_id(&self, patient_id: Id) -> StoreResult<Vec<Appointment>>;
}
