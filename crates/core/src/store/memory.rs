//! In-memory storage.
//!
//! Rows live in an ordered map guarded by a `std::sync::Mutex`. The lock is never held across
//! an `.await`, so the store is safe to share between request tasks. Identities start at 1 and
//! are never reused, even after deletes.

use super::{AppointmentRepository, DentistRepository, PatientRepository, Repository};
use crate::models::{Appointment, Dentist, Entity, Id, Patient};
use crate::{StoreError, StoreResult};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

#[derive(Debug)]
struct Table<E> {
    rows: BTreeMap<Id, E>,
    next_id: Id,
}

/// Process-local storage for one entity type.
#[derive(Debug)]
pub struct MemoryStore<E> {
    table: Mutex<Table<E>>,
}

impl<E: Entity> MemoryStore<E> {
    pub fn new() -> Self {
        Self {
            table: Mutex::new(Table {
                rows: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }

    fn table(&self) -> StoreResult<MutexGuard<'_, Table<E>>> {
        self.table
            .lock()
            .map_err(|_| StoreError::Backend(format!("{} table lock poisoned", E::NAME)))
    }

    fn find_id(&self, matches: impl Fn(&E) -> bool) -> StoreResult<Id> {
        self.table()?
            .rows
            .values()
            .find(|row| matches(row))
            .map(Entity::id)
            .ok_or(StoreError::NotFound)
    }

    fn filter(&self, matches: impl Fn(&E) -> bool) -> StoreResult<Vec<E>> {
        Ok(self
            .table()?
            .rows
            .values()
            .filter(|row| matches(row))
            .cloned()
            .collect())
    }
}

impl<E: Entity> Default for MemoryStore<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<E: Entity> Repository<E> for MemoryStore<E> {
    async fn create(&self, mut entity: E) -> StoreResult<E> {
        let mut table = self.table()?;
        let id = table.next_id;
        table.next_id += 1;
        entity.set_id(id);
        table.rows.insert(id, entity.clone());
        tracing::debug!("memory store: created {} {}", E::NAME, id);
        Ok(entity)
    }

    async fn get_by_id(&self, id: Id) -> StoreResult<E> {
        self.table()?
            .rows
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn get_all(&self) -> StoreResult<Vec<E>> {
        Ok(self.table()?.rows.values().cloned().collect())
    }

    async fn update(&self, entity: E) -> StoreResult<E> {
        let mut table = self.table()?;
        match table.rows.get_mut(&entity.id()) {
            Some(row) => {
                *row = entity.clone();
                Ok(entity)
            }
            None => Err(StoreError::NotFound),
        }
    }

    async fn delete(&self, id: Id) -> StoreResult<()> {
        self.table()?
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound)
    }
}

#[async_trait]
impl DentistRepository for MemoryStore<Dentist> {
    async fn id_by_license_number(&self, license_number: &str) -> StoreResult<Id> {
        self.find_id(|d| d.license_number == license_number)
    }
}

#[async_trait]
impl PatientRepository for MemoryStore<Patient> {
    async fn id_by_national_id(&self, national_id: &str) -> StoreResult<Id> {
        self.find_id(|p| p.national_id == national_id)
    }
}

#[async_trait]
impl AppointmentRepository for MemoryStore<Appointment> {
    async fn by_dentist_id(&self, dentist_id: Id) -> StoreResult<Vec<Appointment>> {
        self.filter(|a| a.dentist_id == dentist_id)
    }

    async fn by_patient_id(&self, patient_id: Id) -> StoreResult<Vec<Appointment>> {
        self.filter(|a| a.patient_id == patient_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dentist(license: &str) -> Dentist {
        Dentist {
            id: 0,
            last_name: "Pérez".into(),
            first_name: "Ana".into(),
            license_number: license.into(),
        }
    }

    #[tokio::test]
    async fn test_identities_are_never_reused() {
        let store = MemoryStore::<Dentist>::new();
        let first = store.create(dentist("MP-1")).await.expect("create first");
        store.delete(first.id).await.expect("delete first");
        let second = store.create(dentist("MP-2")).await.expect("create second");

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn test_update_and_delete_of_missing_row_report_not_found() {
        let store = MemoryStore::<Dentist>::new();
        let mut ghost = dentist("MP-9");
        ghost.id = 99;

        assert!(matches!(
            store.update(ghost).await,
            Err(StoreError::NotFound)
        ));
        assert!(matches!(store.delete(99).await, Err(StoreError::NotFound)));
    }

    #[tokio::test]
    async fn test_empty_table_lists_nothing() {
        let store = MemoryStore::<Dentist>::new();
        let rows = store.get_all().await.expect("empty table is not an error");
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn test_natural_key_lookup() {
        let store = MemoryStore::<Dentist>::new();
        let created = store.create(dentist("MP-7")).await.expect("create");

        assert_eq!(
            store.id_by_license_number("MP-7").await.expect("lookup"),
            created.id
        );
        assert!(matches!(
            store.id_by_license_number("MP-8").await,
            Err(StoreError::NotFound)
        ));
    }
}
