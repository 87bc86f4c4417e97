//! Error to HTTP response mapping.
//!
//! Every failure leaves the API through [`ApiError`]. Its kind selects one row of
//! [`ERROR_TABLE`], which fixes the status code, the error code and the leading message text; the
//! failure detail is appended to that message.

use api_shared::{AuthError, ErrorResponse};
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        FromRequest, FromRequestParts,
    },
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use clinic_core::{ClinicError, ErrorKind, Id};

/// Kinds of failure the REST API reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApiErrorKind {
    Validation,
    Forbidden,
    NotFound,
    EmptyList,
    Execution,
    StorageUnavailable,
}

impl From<ErrorKind> for ApiErrorKind {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::Validation => ApiErrorKind::Validation,
            ErrorKind::NotFound => ApiErrorKind::NotFound,
            ErrorKind::EmptyList => ApiErrorKind::EmptyList,
            ErrorKind::Execution => ApiErrorKind::Execution,
            ErrorKind::StorageUnavailable => ApiErrorKind::StorageUnavailable,
        }
    }
}

/// One row of the error table.
#[derive(Debug)]
pub struct ErrorEntry {
    pub kind: ApiErrorKind,
    pub status: StatusCode,
    pub code: &'static str,
    pub message: &'static str,
}

pub static ERROR_TABLE: [ErrorEntry; 6] = [
    ErrorEntry {
        kind: ApiErrorKind::Validation,
        status: StatusCode::BAD_REQUEST,
        code: "VALIDATION",
        message: "invalid request data",
    },
    ErrorEntry {
        kind: ApiErrorKind::Forbidden,
        status: StatusCode::FORBIDDEN,
        code: "FORBIDDEN",
        message: "invalid credentials",
    },
    ErrorEntry {
        kind: ApiErrorKind::NotFound,
        status: StatusCode::NOT_FOUND,
        code: "NOT_FOUND",
        message: "no element matches the supplied data",
    },
    ErrorEntry {
        kind: ApiErrorKind::EmptyList,
        status: StatusCode::NOT_FOUND,
        code: "EMPTY_LIST",
        message: "no records found",
    },
    ErrorEntry {
        kind: ApiErrorKind::Execution,
        status: StatusCode::INTERNAL_SERVER_ERROR,
        code: "EXECUTION",
        message: "server problem",
    },
    ErrorEntry {
        kind: ApiErrorKind::StorageUnavailable,
        status: StatusCode::INTERNAL_SERVER_ERROR,
        code: "STORAGE_UNAVAILABLE",
        message: "server problem",
    },
];

static FALLBACK: ErrorEntry = ErrorEntry {
    kind: ApiErrorKind::Execution,
    status: StatusCode::INTERNAL_SERVER_ERROR,
    code: "INTERNAL",
    message: "Internal Server Error",
};

/// Looks up the table row for `kind`.
pub fn entry_for(kind: ApiErrorKind) -> &'static ErrorEntry {
    ERROR_TABLE
        .iter()
        .find(|entry| entry.kind == kind)
        .unwrap_or(&FALLBACK)
}

/// A failed request.
#[derive(Debug)]
pub struct ApiError {
    kind: ApiErrorKind,
    detail: String,
}

impl ApiError {
    pub fn new(kind: ApiErrorKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }

    pub fn kind(&self) -> ApiErrorKind {
        self.kind
    }
}

impl From<ClinicError> for ApiError {
    fn from(err: ClinicError) -> Self {
        Self::new(err.kind().into(), err.to_string())
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        Self::new(ApiErrorKind::Forbidden, err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let entry = entry_for(self.kind);
        let body = ErrorResponse::new(
            entry.status.as_u16(),
            entry.code,
            format!("{}: {}", entry.message, self.detail),
        );
        (entry.status, Json(body)).into_response()
    }
}

/// JSON body extractor whose rejections are reported through the error table.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// Query string extractor whose rejections are reported through the error table.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::warn!("rejected request body: {}", rejection.body_text());
        Self::new(ApiErrorKind::Validation, rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        tracing::warn!("rejected query string: {}", rejection.body_text());
        Self::new(ApiErrorKind::Validation, rejection.body_text())
    }
}

/// Parses a path identity, rejecting anything that is not a decimal integer.
pub fn parse_path_id(raw: &str) -> Result<Id, ApiError> {
    raw.parse::<Id>().map_err(|_| {
        tracing::warn!("rejected non-numeric path id {:?}", raw);
        ApiError::new(ApiErrorKind::Validation, format!("invalid id {raw:?}"))
    })
}
