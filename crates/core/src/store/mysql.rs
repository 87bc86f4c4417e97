//! MySQL storage through a `sqlx` connection pool.

use super::queries::{
    EntityQueries, APPOINTMENTS_BY_DENTIST, APPOINTMENTS_BY_PATIENT, APPOINTMENT_QUERIES,
    DENTIST_ID_BY_LICENSE, DENTIST_QUERIES, PATIENT_ID_BY_NATIONAL_ID, PATIENT_QUERIES, SCHEMA,
};
use super::{AppointmentRepository, DentistRepository, PatientRepository, Repository};
use crate::models::{Appointment, Dentist, Entity, Id, Patient};
use crate::{StoreError, StoreResult};
use async_trait::async_trait;
use sqlx::mysql::{MySql, MySqlArguments, MySqlPool, MySqlPoolOptions, MySqlRow};
use sqlx::query::Query;
use sqlx::Row;
use std::marker::PhantomData;

type MySqlQuery<'q> = Query<'q, MySql, MySqlArguments>;

/// Opens a connection pool and makes sure the clinic tables exist.
pub async fn connect(database_url: &str, max_connections: u32) -> StoreResult<MySqlPool> {
    let pool = MySqlPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;

    for statement in SCHEMA {
        sqlx::query(statement).execute(&pool).await?;
    }

    Ok(pool)
}

/// Mapping between an entity and its table.
pub trait SqlRecord: Entity + Sized {
    const QUERIES: &'static EntityQueries;

    /// Binds the non-identity columns in the order used by the insert and update statements.
    fn bind_fields<'q>(&self, query: MySqlQuery<'q>) -> MySqlQuery<'q>;

    fn from_row(row: &MySqlRow) -> Result<Self, sqlx::Error>;
}

impl SqlRecord for Dentist {
    const QUERIES: &'static EntityQueries = &DENTIST_QUERIES;

    fn bind_fields<'q>(&self, query: MySqlQuery<'q>) -> MySqlQuery<'q> {
        query
            .bind(self.last_name.clone())
            .bind(self.first_name.clone())
            .bind(self.license_number.clone())
    }

    fn from_row(row: &MySqlRow) -> Result<Self, sqlx::Error> {
        Ok(Dentist {
            id: row.try_get("id")?,
            last_name: row.try_get("apellido")?,
            first_name: row.try_get("nombre")?,
            license_number: row.try_get("matricula")?,
        })
    }
}

impl SqlRecord for Patient {
    const QUERIES: &'static EntityQueries = &PATIENT_QUERIES;

    fn bind_fields<'q>(&self, query: MySqlQuery<'q>) -> MySqlQuery<'q> {
        query
            .bind(self.first_name.clone())
            .bind(self.last_name.clone())
            .bind(self.address.clone())
            .bind(self.national_id.clone())
            .bind(self.admission_date)
    }

    fn from_row(row: &MySqlRow) -> Result<Self, sqlx::Error> {
        Ok(Patient {
            id: row.try_get("id")?,
            first_name: row.try_get("nombre")?,
            last_name: row.try_get("apellido")?,
            address: row.try_get("domicilio")?,
            national_id: row.try_get("dni")?,
            admission_date: row.try_get("fecha_alta")?,
        })
    }
}

impl SqlRecord for Appointment {
    const QUERIES: &'static EntityQueries = &APPOINTMENT_QUERIES;

    fn bind_fields<'q>(&self, query: MySqlQuery<'q>) -> MySqlQuery<'q> {
        query
            .bind(self.dentist_id)
            .bind(self.patient_id)
            .bind(self.date_time)
            .bind(self.description.clone())
    }

    fn from_row(row: &MySqlRow) -> Result<Self, sqlx::Error> {
        Ok(Appointment {
            id: row.try_get("id")?,
            dentist_id: row.try_get("id_odontologo")?,
            patient_id: row.try_get("id_paciente")?,
            date_time: row.try_get("fecha_hora")?,
            description: row.try_get("descripcion")?,
        })
    }
}

/// MySQL-backed repository for one entity type.
#[derive(Debug)]
pub struct MySqlRepository<E> {
    pool: MySqlPool,
    queries: &'static EntityQueries,
    _entity: PhantomData<fn() -> E>,
}

impl<E: SqlRecord> MySqlRepository<E> {
    pub fn new(pool: MySqlPool) -> Self {
        Self {
            pool,
            queries: E::QUERIES,
            _entity: PhantomData,
        }
    }

    async fn fetch_many(&self, sql: &'static str, key: Id) -> StoreResult<Vec<E>> {
        let rows = sqlx::query(sql).bind(key).fetch_all(&self.pool).await?;
        rows.iter()
            .map(E::from_row)
            .collect::<Result<Vec<_>, _>>()
            .map_err(StoreError::from)
    }
}

#[async_trait]
impl<E: SqlRecord> Repository<E> for MySqlRepository<E> {
    async fn create(&self, mut entity: E) -> StoreResult<E> {
        let result = entity
            .bind_fields(sqlx::query(self.queries.insert))
            .execute(&self.pool)
            .await?;

        let id = Id::try_from(result.last_insert_id())
            .map_err(|e| StoreError::Backend(format!("insert id out of range: {e}")))?;
        entity.set_id(id);
        tracing::debug!("mysql: created {} {}", E::NAME, id);
        Ok(entity)
    }

    async fn get_by_id(&self, id: Id) -> StoreResult<E> {
        let row = sqlx::query(self.queries.select_by_id)
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(E::from_row(&row)?)
    }

    async fn get_all(&self) -> StoreResult<Vec<E>> {
        let rows = sqlx::query(self.queries.select_all)
            .fetch_all(&self.pool)
            .await?;
        rows.iter()
            .map(E::from_row)
            .collect::<Result<Vec<_>, _>>()
            .map_err(StoreError::from)
    }

    async fn update(&self, entity: E) -> StoreResult<E> {
        let result = entity
            .bind_fields(sqlx::query(self.queries.update))
            .bind(entity.id())
            .execute(&self.pool)
            .await?;

        // MySQL reports changed rows, not matched rows, so an unchanged write also affects zero.
        if result.rows_affected() == 0 {
            sqlx::query(self.queries.exists)
                .bind(entity.id())
                .fetch_optional(&self.pool)
                .await?
                .ok_or(StoreError::NotFound)?;
        }
        Ok(entity)
    }

    async fn delete(&self, id: Id) -> StoreResult<()> {
        let result = sqlx::query(self.queries.delete)
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl DentistRepository for MySqlRepository<Dentist> {
    async fn id_by_license_number(&self, license_number: &str) -> StoreResult<Id> {
        Ok(sqlx::query_scalar::<_, Id>(DENTIST_ID_BY_LICENSE)
            .bind(license_number)
            .fetch_one(&self.pool)
            .await?)
    }
}

#[async_trait]
impl PatientRepository for MySqlRepository<Patient> {
    async fn id_by_national_id(&self, national_id: &str) -> StoreResult<Id> {
        Ok(sqlx::query_scalar::<_, Id>(PATIENT_ID_BY_NATIONAL_ID)
            .bind(national_id)
            .fetch_one(&self.pool)
            .await?)
    }
}

#[async_trait]
impl AppointmentRepository for MySqlRepository<Appointment> {
    async fn by_dentist_id(&self, dentist_id: Id) -> StoreResult<Vec<Appointment>> {
        self.fetch_many(APPOINTMENTS_BY_DENTIST, dentist_id).await
    }

    async fn by_patient_id(&self, patient_id: Id) -> StoreResult<Vec<Appointment>> {
        self.fetch_many(APPOINTMENTS_BY_PATIENT, patient_id).await
    }
}
