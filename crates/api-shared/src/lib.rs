//! # API Shared
//!
//! Shared utilities and definitions for the clinic APIs.
//!
//! Contains:
//! - Shared services like `HealthService`
//! - Authentication utilities (API-key validation, independent of the HTTP stack)
//! - The JSON body returned for every failed request
//!
//! Used by `api-rest` for common functionality.

pub mod auth;
pub mod health;
pub mod response;

pub use auth::{validate_api_key, AuthError};
pub use health::{HealthRes, HealthService};
pub use response::ErrorResponse;
