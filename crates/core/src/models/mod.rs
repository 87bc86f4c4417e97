//! Canonical clinic entities and their request shapes.
//!
//! Field names on the wire follow the clinic's established JSON contract (`apellido`,
//! `matricula`, `fecha_hora`, ...), while the Rust fields use English names.

pub mod appointment;
pub mod dentist;
pub mod patient;

pub use appointment::{Appointment, AppointmentRequest, NaturalKeyAppointmentRequest};
pub use dentist::{Dentist, DentistRequest};
pub use patient::{Patient, PatientRequest};

/// Surrogate identity assigned by storage.
pub type Id = i64;

/// Identity value of an entity that has not been stored yet.
pub const UNASSIGNED_ID: Id = 0;

/// Behaviour shared by every stored entity.
pub trait Entity: Clone + Send + Sync + 'static {
    /// Human readable entity name used in logs and error messages.
    const NAME: &'static str;

    fn id(&self) -> Id;

    fn set_id(&mut self, id: Id);
}
