//! Per-entity SQL query tables.
//!
//! Each table maps an operation to its parameterised MySQL statement. A repository picks its
//! table once at construction and never changes it afterwards.

/// The statements a [`MySqlRepository`](super::MySqlRepository) runs for one entity.
#[derive(Debug)]
pub struct EntityQueries {
    pub insert: &'static str,
    pub select_all: &'static str,
    pub select_by_id: &'static str,
    /// Field placeholders in the same order as `insert`, followed by the identity.
    pub update: &'static str,
    pub delete: &'static str,
    /// Used to tell "row unchanged" apart from "row missing" when an update affects zero rows.
    pub exists: &'static str,
}

pub const DENTIST_QUERIES: EntityQueries = EntityQueries {
    insert: "INSERT INTO odontologos (apellido, nombre, matricula) VALUES (?, ?, ?)",
    select_all: "SELECT id, apellido, nombre, matricula FROM odontologos",
    select_by_id: "SELECT id, apellido, nombre, matricula FROM odontologos WHERE id = ?",
    update: "UPDATE odontologos SET apellido = ?, nombre = ?, matricula = ? WHERE id = ?",
    delete: "DELETE FROM odontologos WHERE id = ?",
    exists: "SELECT id FROM odontologos WHERE id = ?",
};

pub const DENTIST_ID_BY_LICENSE: &str = "SELECT id FROM odontologos WHERE matricula = ? LIMIT 1";

pub const PATIENT_QUERIES: EntityQueries = EntityQueries {
    insert: "INSERT INTO pacientes (nombre, apellido, domicilio, dni, fecha_alta) VALUES (?, ?, ?, ?, ?)",
    select_all: "SELECT id, nombre, apellido, domicilio, dni, fecha_alta FROM pacientes",
    select_by_id:
        "SELECT id, nombre, apellido, domicilio, dni, fecha_alta FROM pacientes WHERE id = ?",
    update: "UPDATE pacientes SET nombre = ?, apellido = ?, domicilio = ?, dni = ?, fecha_alta = ? WHERE id = ?",
    delete: "DELETE FROM pacientes WHERE id = ?",
    exists: "SELECT id FROM pacientes WHERE id = ?",
};

pub const PATIENT_ID_BY_NATIONAL_ID: &str = "SELECT id FROM pacientes WHERE dni = ? LIMIT 1";

pub const APPOINTMENT_QUERIES: EntityQueries = EntityQueries {
    insert: "INSERT INTO turnos (id_odontologo, id_paciente, fecha_hora, descripcion) VALUES (?, ?, ?, ?)",
    select_all: "SELECT id, id_odontologo, id_paciente, fecha_hora, descripcion FROM turnos",
    select_by_id:
        "SELECT id, id_odontologo, id_paciente, fecha_hora, descripcion FROM turnos WHERE id = ?",
    update: "UPDATE turnos SET id_odontologo = ?, id_paciente = ?, fecha_hora = ?, descripcion = ? WHERE id = ?",
    delete: "DELETE FROM turnos WHERE id = ?",
    exists: "SELECT id FROM turnos WHERE id = ?",
};

pub const APPOINTMENTS_BY_DENTIST: &str =
    "SELECT id, id_odontologo, id_paciente, fecha_hora, descripcion FROM turnos WHERE id_odontologo = ?";

pub const APPOINTMENTS_BY_PATIENT: &str =
    "SELECT id, id_odontologo, id_paciente, fecha_hora, descripcion FROM turnos WHERE id_paciente = ?";

/// Table definitions, applied in order at startup. Deleting a dentist or patient does not rely on
/// foreign key cascades; referencing appointments are removed by
/// [`Clinic`](crate::Clinic) first.
pub const SCHEMA: [&str; 3] = [
    "CREATE TABLE IF NOT EXISTS odontologos (
        id BIGINT NOT NULL AUTO_INCREMENT PRIMARY KEY,
        apellido VARCHAR(255) NOT NULL,
        nombre VARCHAR(255) NOT NULL,
        matricula VARCHAR(64) NOT NULL,
        INDEX idx_odontologos_matricula (matricula)
    )",
    "CREATE TABLE IF NOT EXISTS pacientes (
        id BIGINT NOT NULL AUTO_INCREMENT PRIMARY KEY,
        nombre VARCHAR(255) NOT NULL,
        apellido VARCHAR(255) NOT NULL,
        domicilio VARCHAR(255) NULL,
        dni VARCHAR(32) NOT NULL,
        fecha_alta DATE NULL,
        INDEX idx_pacientes_dni (dni)
    )",
    "CREATE TABLE IF NOT EXISTS turnos (
        id BIGINT NOT NULL AUTO_INCREMENT PRIMARY KEY,
        id_odontologo BIGINT NOT NULL,
        id_paciente BIGINT NOT NULL,
        fecha_hora DATETIME NOT NULL,
        descripcion TEXT NULL,
        INDEX idx_turnos_odontologo (id_odontologo),
        INDEX idx_turnos_paciente (id_paciente)
    )",
];
