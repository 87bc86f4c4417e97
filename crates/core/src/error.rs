//! Domain and storage error types.
//!
//! Storage implementations report [`StoreError`]. Services convert every storage error into a
//! [`ClinicError`] (logging it on the way) so callers only ever see the closed set of
//! [`ErrorKind`]s.

/// Errors reported by the storage collaborator.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No row matched the identity or natural key, or an update/delete affected zero rows.
    #[error("no matching row")]
    NotFound,
    /// The backend failed for a reason other than absence.
    #[error("storage backend failure: {0}")]
    Backend(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => StoreError::NotFound,
            other => StoreError::Backend(other.to_string()),
        }
    }
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Errors surfaced by the clinic services.
#[derive(Debug, thiserror::Error)]
pub enum ClinicError {
    #[error("invalid input: {0}")]
    Validation(String),
    #[error("{0} not found")]
    NotFound(String),
    #[error("storage operation failed: {0}")]
    Execution(String),
    #[error("no {0} records found")]
    EmptyList(&'static str),
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),
}

/// Closed set of error kinds, used by API layers to pick a response.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Execution,
    EmptyList,
    StorageUnavailable,
}

impl ClinicError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClinicError::Validation(_) => ErrorKind::Validation,
            ClinicError::NotFound(_) => ErrorKind::NotFound,
            ClinicError::Execution(_) => ErrorKind::Execution,
            ClinicError::EmptyList(_) => ErrorKind::EmptyList,
            ClinicError::StorageUnavailable(_) => ErrorKind::StorageUnavailable,
        }
    }

    /// Converts a storage error raised while operating on `what`.
    ///
    /// `StoreError::NotFound` becomes [`ClinicError::NotFound`]; anything else becomes
    /// [`ClinicError::Execution`].
    pub(crate) fn from_store(what: impl Into<String>, err: StoreError) -> Self {
        let what = what.into();
        match err {
            StoreError::NotFound => ClinicError::NotFound(what),
            StoreError::Backend(msg) => ClinicError::Execution(format!("{what}: {msg}")),
        }
    }
}

pub type ClinicResult<T> = std::result::Result<T, ClinicError>;
