use super::{create_entity, delete_entity, get_entity, list_entities, update_entity};
use super::{DentistService, PatientService};
use crate::models::{
    Appointment, AppointmentRequest, Id, NaturalKeyAppointmentRequest, UNASSIGNED_ID,
};
use crate::patch::{AppointmentPatch, Patch};
use crate::store::AppointmentRepository;
use crate::validation::Validate;
use crate::{ClinicError, ClinicResult};
use std::sync::Arc;

/// Appointment operations, including creation from dentist/patient natural keys.
#[derive(Clone)]
pub struct AppointmentService {
    store: Arc<dyn AppointmentRepository>,
    patients: PatientService,
    dentists: DentistService,
}

impl AppointmentService {
    pub fn new(
        store: Arc<dyn AppointmentRepository>,
        patients: PatientService,
        dentists: DentistService,
    ) -> Self {
        Self {
            store,
            patients,
            dentists,
        }
    }

    pub async fn get_by_id(&self, id: Id) -> ClinicResult<Appointment> {
        get_entity(&*self.store, id).await
    }

    pub async fn get_all(&self) -> ClinicResult<Vec<Appointment>> {
        list_entities(&*self.store).await
    }

    /// Stores an appointment that references dentist and patient by identity.
    ///
    /// Only `id >= 1` is checked; the referenced dentist and patient are not looked up.
    pub async fn create(&self, request: AppointmentRequest) -> ClinicResult<Appointment> {
        let date_time = require_date_time(&request)?;
        let entity = request.clone().into_appointment(UNASSIGNED_ID, date_time);
        create_entity(&*self.store, &request, entity).await
    }

    /// Creates an appointment for the patient with `national_id` and the dentist with
    /// `license_number`.
    ///
    /// The natural keys are validated before any lookup. The patient is resolved before the
    /// dentist, so when both keys are unknown the error names the patient.
    ///
    /// # Errors
    ///
    /// - [`ClinicError::Validation`] if a key is empty or the timestamp is missing
    /// - [`ClinicError::NotFound`] if either lookup fails; nothing is created
    /// - [`ClinicError::Execution`] if the insert fails
    pub async fn create_by_natural_keys(
        &self,
        request: NaturalKeyAppointmentRequest,
    ) -> ClinicResult<Appointment> {
        if let Err(e) = request.validate() {
            tracing::warn!("rejected natural-key appointment: {}", e);
            return Err(e);
        }

        let patient_id = self.patients.id_by_national_id(&request.national_id).await?;
        let dentist_id = self
            .dentists
            .id_by_license_number(&request.license_number)
            .await?;

        self.create(AppointmentRequest {
            dentist_id,
            patient_id,
            date_time: request.date_time,
            description: request.description,
        })
        .await
    }

    pub async fn update(&self, request: AppointmentRequest, id: Id) -> ClinicResult<Appointment> {
        let date_time = require_date_time(&request)?;
        let entity = request.clone().into_appointment(id, date_time);
        update_entity(&*self.store, &request, entity).await
    }

    pub async fn patch(&self, id: Id, patch: AppointmentPatch) -> ClinicResult<Appointment> {
        let original = self.get_by_id(id).await?;
        let request = patch.merge(&original)?;
        self.update(request, id).await
    }

    pub async fn delete(&self, id: Id) -> ClinicResult<()> {
        delete_entity::<Appointment, _>(&*self.store, id).await
    }

    /// Appointments booked with dentist `dentist_id`.
    ///
    /// # Errors
    ///
    /// [`ClinicError::EmptyList`] if there are none.
    pub async fn by_dentist_id(&self, dentist_id: Id) -> ClinicResult<Vec<Appointment>> {
        let found = self.store.by_dentist_id(dentist_id).await.map_err(|e| {
            tracing::error!("appointment lookup for dentist {} failed: {}", dentist_id, e);
            ClinicError::Execution(e.to_string())
        })?;
        non_empty(found)
    }

    /// Appointments of the patient whose national ID is `national_id`.
    ///
    /// # Errors
    ///
    /// - [`ClinicError::NotFound`] if no patient has that national ID
    /// - [`ClinicError::EmptyList`] if the patient has no appointments
    pub async fn by_patient_national_id(
        &self,
        national_id: &str,
    ) -> ClinicResult<Vec<Appointment>> {
        let patient_id = self.patients.id_by_national_id(national_id).await?;
        let found = self.store.by_patient_id(patient_id).await.map_err(|e| {
            tracing::error!("appointment lookup for patient {} failed: {}", patient_id, e);
            ClinicError::Execution(e.to_string())
        })?;
        non_empty(found)
    }
}

/// Validates the request and extracts its timestamp, which the entity requires.
fn require_date_time(
    request: &AppointmentRequest,
) -> ClinicResult<chrono::DateTime<chrono::Utc>> {
    if let Err(e) = request.validate() {
        tracing::warn!("rejected appointment request: {}", e);
        return Err(e);
    }
    request
        .date_time
        .ok_or_else(|| ClinicError::Validation("fecha_hora is required".into()))
}

fn non_empty(found: Vec<Appointment>) -> ClinicResult<Vec<Appointment>> {
    if found.is_empty() {
        Err(ClinicError::EmptyList("appointment"))
    } else {
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Dentist, DentistRequest, Patient, PatientRequest};
    use crate::store::{MemoryStore, Repository};
    use crate::ErrorKind;
    use chrono::{TimeZone, Utc};

    struct Fixture {
        service: AppointmentService,
        dentists: DentistService,
        patients: PatientService,
        store: Arc<MemoryStore<Appointment>>,
    }

    fn fixture() -> Fixture {
        let dentists = DentistService::new(Arc::new(MemoryStore::<Dentist>::new()));
        let patients = PatientService::new(Arc::new(MemoryStore::<Patient>::new()));
        let store = Arc::new(MemoryStore::<Appointment>::new());
        let service = AppointmentService::new(store.clone(), patients.clone(), dentists.clone());
        Fixture {
            service,
            dentists,
            patients,
            store,
        }
    }

    async fn seed(f: &Fixture) -> (Dentist, Patient) {
        let dentist = f
            .dentists
            .create(DentistRequest {
                last_name: "Pérez".into(),
                first_name: "Ana".into(),
                license_number: "MP-1".into(),
            })
            .await
            .expect("seed dentist");
        let patient = f
            .patients
            .create(PatientRequest {
                first_name: "Luis".into(),
                last_name: "Gómez".into(),
                national_id: "30111222".into(),
                ..Default::default()
            })
            .await
            .expect("seed patient");
        (dentist, patient)
    }

    fn natural_request(license: &str, national_id: &str) -> NaturalKeyAppointmentRequest {
        NaturalKeyAppointmentRequest {
            license_number: license.into(),
            national_id: national_id.into(),
            date_time: Some(Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap()),
            description: Some("control".into()),
        }
    }

    #[tokio::test]
    async fn test_natural_keys_resolve_to_identities() {
        let f = fixture();
        let (dentist, patient) = seed(&f).await;

        let created = f
            .service
            .create_by_natural_keys(natural_request("MP-1", "30111222"))
            .await
            .expect("create by natural keys");

        assert_ne!(created.id, 0);
        assert_eq!(created.dentist_id, dentist.id);
        assert_eq!(created.patient_id, patient.id);
        assert_eq!(created.description.as_deref(), Some("control"));
    }

    #[tokio::test]
    async fn test_unknown_license_creates_nothing() {
        let f = fixture();
        seed(&f).await;

        let err = f
            .service
            .create_by_natural_keys(natural_request("BAD-LICENSE", "30111222"))
            .await
            .expect_err("unknown license");

        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(err.to_string().contains("dentist"));
        assert!(f.store.get_all().await.expect("list").is_empty());
    }

    #[tokio::test]
    async fn test_patient_lookup_failure_takes_precedence() {
        let f = fixture();
        seed(&f).await;

        let err = f
            .service
            .create_by_natural_keys(natural_request("BAD-LICENSE", "00000000"))
            .await
            .expect_err("both keys unknown");

        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(err.to_string().contains("patient"), "got: {err}");
    }

    #[tokio::test]
    async fn test_empty_natural_key_is_rejected_before_lookup() {
        let f = fixture();

        let err = f
            .service
            .create_by_natural_keys(natural_request("", "30111222"))
            .await
            .expect_err("empty license");
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_direct_create_does_not_check_references() {
        let f = fixture();

        let created = f
            .service
            .create(AppointmentRequest {
                dentist_id: 500,
                patient_id: 600,
                date_time: Some(Utc::now()),
                description: None,
            })
            .await
            .expect("ids are not verified");
        assert_eq!(created.dentist_id, 500);
    }

    #[tokio::test]
    async fn test_create_without_timestamp_is_rejected() {
        let f = fixture();
        let err = f
            .service
            .create(AppointmentRequest {
                dentist_id: 1,
                patient_id: 1,
                ..Default::default()
            })
            .await
            .expect_err("missing fecha_hora");
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_lookup_by_patient_national_id() {
        let f = fixture();
        let (_, patient) = seed(&f).await;

        let err = f
            .service
            .by_patient_national_id(&patient.national_id)
            .await
            .expect_err("no appointments yet");
        assert_eq!(err.kind(), ErrorKind::EmptyList);

        f.service
            .create_by_natural_keys(natural_request("MP-1", "30111222"))
            .await
            .expect("create");
        let found = f
            .service
            .by_patient_national_id(&patient.national_id)
            .await
            .expect("one appointment");
        assert_eq!(found.len(), 1);

        let err = f
            .service
            .by_patient_national_id("99999999")
            .await
            .expect_err("unknown patient");
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_patch_moves_appointment_time() {
        let f = fixture();
        seed(&f).await;
        let created = f
            .service
            .create_by_natural_keys(natural_request("MP-1", "30111222"))
            .await
            .expect("create");

        let patched = f
            .service
            .patch(
                created.id,
                AppointmentPatch {
                    date_time: Some("2024-06-02 15:00".into()),
                    ..Default::default()
                },
            )
            .await
            .expect("patch");

        assert_eq!(
            patched.date_time,
            Utc.with_ymd_and_hms(2024, 6, 2, 15, 0, 0).unwrap()
        );
        assert_eq!(patched.dentist_id, created.dentist_id);
        assert_eq!(patched.description, created.description);
    }
}
