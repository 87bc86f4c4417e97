//! Clinic composition root and cascading deletes.
//!
//! [`Clinic`] wires the three services together in their fixed order and owns the operations
//! that span entities: removing a dentist or patient together with the appointments that
//! reference it.
//!
//! Cascades are best-effort, not transactional:
//!
//! - a failed appointment lookup counts as "no appointments"
//! - a failed appointment delete is recorded and logged, and the loop carries on
//! - the dentist/patient delete always runs, and its error is the only one surfaced
//! - appointment deletes already performed are never undone

use crate::models::{Appointment, Dentist, Id, Patient};
use crate::services::{AppointmentService, DentistService, PatientService};
use crate::store::{
    AppointmentRepository, DentistRepository, MemoryStore, MySqlRepository, PatientRepository,
};
use crate::ClinicResult;
use serde::Serialize;
use sqlx::mysql::MySqlPool;
use std::sync::Arc;
use utoipa::ToSchema;

/// Outcome of the appointment clean-up that precedes a dentist/patient delete.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct CascadeReport {
    /// Appointments deleted before the owning record.
    pub removed_appointments: Vec<Id>,
    /// Appointments whose delete failed; they may still reference the deleted record.
    pub failed_appointments: Vec<Id>,
}

/// Entry point for all clinic operations.
#[derive(Clone)]
pub struct Clinic {
    dentists: DentistService,
    patients: PatientService,
    appointments: AppointmentService,
}

impl Clinic {
    pub fn new(
        dentist_store: Arc<dyn DentistRepository>,
        patient_store: Arc<dyn PatientRepository>,
        appointment_store: Arc<dyn AppointmentRepository>,
    ) -> Self {
        let dentists = DentistService::new(dentist_store);
        let patients = PatientService::new(patient_store);
        let appointments =
            AppointmentService::new(appointment_store, patients.clone(), dentists.clone());
        Self {
            dentists,
            patients,
            appointments,
        }
    }

    /// A clinic whose records live in process memory.
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(MemoryStore::<Dentist>::new()),
            Arc::new(MemoryStore::<Patient>::new()),
            Arc::new(MemoryStore::<Appointment>::new()),
        )
    }

    /// A clinic backed by MySQL tables reached through `pool`.
    pub fn mysql(pool: MySqlPool) -> Self {
        Self::new(
            Arc::new(MySqlRepository::<Dentist>::new(pool.clone())),
            Arc::new(MySqlRepository::<Patient>::new(pool.clone())),
            Arc::new(MySqlRepository::<Appointment>::new(pool)),
        )
    }

    pub fn dentists(&self) -> &DentistService {
        &self.dentists
    }

    pub fn patients(&self) -> &PatientService {
        &self.patients
    }

    pub fn appointments(&self) -> &AppointmentService {
        &self.appointments
    }

    /// Deletes dentist `id` after deleting the appointments booked with it.
    ///
    /// # Errors
    ///
    /// Only the dentist delete can fail the call ([`ClinicError::NotFound`] for an unknown id).
    ///
    /// [`ClinicError::NotFound`]: crate::ClinicError::NotFound
    pub async fn delete_dentist(&self, id: Id) -> ClinicResult<CascadeReport> {
        let referencing = self.appointments.by_dentist_id(id).await;
        let report = self.remove_appointments(referencing).await;
        self.dentists.delete(id).await?;
        Ok(report)
    }

    /// Deletes patient `id` after deleting its appointments.
    ///
    /// The patient is fetched first; its national ID drives the appointment lookup.
    ///
    /// National IDs are not unique, and the lookup resolves to the first patient holding the
    /// DNI. Deleting a later patient that shares a DNI therefore removes the appointments of
    /// that first patient, not its own.
    ///
    /// # Errors
    ///
    /// [`ClinicError::NotFound`] if the patient does not exist (nothing is deleted) or if the
    /// final patient delete finds no row.
    ///
    /// [`ClinicError::NotFound`]: crate::ClinicError::NotFound
    pub async fn delete_patient(&self, id: Id) -> ClinicResult<CascadeReport> {
        let patient = self.patients.get_by_id(id).await?;
        let referencing = self
            .appointments
            .by_patient_national_id(&patient.national_id)
            .await;
        let report = self.remove_appointments(referencing).await;
        self.patients.delete(id).await?;
        Ok(report)
    }

    async fn remove_appointments(
        &self,
        referencing: ClinicResult<Vec<Appointment>>,
    ) -> CascadeReport {
        let mut report = CascadeReport::default();

        let appointments = match referencing {
            Ok(appointments) => appointments,
            Err(e) => {
                tracing::debug!("no appointments to cascade: {}", e);
                return report;
            }
        };

        for appointment in appointments {
            match self.appointments.delete(appointment.id).await {
                Ok(()) => report.removed_appointments.push(appointment.id),
                Err(e) => {
                    tracing::warn!(
                        "cascade delete of appointment {} failed, continuing: {}",
                        appointment.id,
                        e
                    );
                    report.failed_appointments.push(appointment.id);
                }
            }
        }

        report
    }
}
