//! Clinic runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into the API layer. Nothing
//! reads process-wide environment variables during request handling.

use crate::constants::{
    API_KEY_HEADER_VAR, API_KEY_VAR, DATABASE_URL_VAR, DEFAULT_API_KEY_HEADER,
    DEFAULT_MAX_CONNECTIONS, DEFAULT_REST_ADDR, MAX_CONNECTIONS_VAR, REST_ADDR_VAR,
};
use crate::{ClinicError, ClinicResult};

/// Configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct ClinicConfig {
    rest_addr: String,
    api_key: String,
    api_key_header: String,
    database_url: Option<String>,
    max_connections: u32,
}

impl ClinicConfig {
    /// Create a new `ClinicConfig`.
    ///
    /// # Errors
    ///
    /// Returns [`ClinicError::Validation`] if the API key or header name is blank, or if
    /// `max_connections` is zero.
    pub fn new(
        rest_addr: String,
        api_key: String,
        api_key_header: String,
        database_url: Option<String>,
        max_connections: u32,
    ) -> ClinicResult<Self> {
        if api_key.trim().is_empty() {
            return Err(ClinicError::Validation("api_key cannot be empty".into()));
        }
        if api_key_header.trim().is_empty() {
            return Err(ClinicError::Validation(
                "api_key_header cannot be empty".into(),
            ));
        }
        if max_connections == 0 {
            return Err(ClinicError::Validation(
                "max_connections must be at least 1".into(),
            ));
        }

        Ok(Self {
            rest_addr,
            api_key,
            // Header names are matched case-insensitively by the HTTP stack.
            api_key_header: api_key_header.trim().to_ascii_lowercase(),
            database_url: database_url.filter(|url| !url.trim().is_empty()),
            max_connections,
        })
    }

    /// Resolve configuration from the process environment.
    pub fn from_env() -> ClinicResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolve configuration through `lookup`, which maps a variable name to its value.
    ///
    /// Unset optional variables fall back to the defaults in [`crate::constants`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ClinicResult<Self> {
        let api_key = lookup(API_KEY_VAR).ok_or_else(|| {
            ClinicError::Validation(format!("{API_KEY_VAR} must be set"))
        })?;
        let max_connections = match lookup(MAX_CONNECTIONS_VAR) {
            Some(raw) => raw.trim().parse::<u32>().map_err(|e| {
                ClinicError::Validation(format!("{MAX_CONNECTIONS_VAR} must be a number: {e}"))
            })?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        Self::new(
            lookup(REST_ADDR_VAR).unwrap_or_else(|| DEFAULT_REST_ADDR.into()),
            api_key,
            lookup(API_KEY_HEADER_VAR).unwrap_or_else(|| DEFAULT_API_KEY_HEADER.into()),
            lookup(DATABASE_URL_VAR),
            max_connections,
        )
    }

    pub fn rest_addr(&self) -> &str {
        &self.rest_addr
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Lower-cased name of the header carrying the API key.
    pub fn api_key_header(&self) -> &str {
        &self.api_key_header
    }

    /// MySQL URL, or `None` to run on the in-memory store.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url.as_deref()
    }

    pub fn max_connections(&self) -> u32 {
        self.max_connections
    }
}
