//! Failure response body shared by the API layers.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// JSON body of every failed request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// HTTP status code, repeated in the body.
    pub status: u16,
    /// Stable machine-readable error code, e.g. `NOT_FOUND`.
    pub code: String,
    /// Human readable description of the failure.
    pub message: String,
}

impl ErrorResponse {
    pub fn new(status: u16, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            code: code.into(),
            message: message.into(),
        }
    }
}
