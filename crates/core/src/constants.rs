//! Constants used throughout the clinic crates.
//!
//! Environment variable names and their defaults live here so that the runner, the REST layer
//! and the tests agree on them.

/// Environment variable holding the REST listen address.
pub const REST_ADDR_VAR: &str = "CLINIC_REST_ADDR";

/// Listen address used when `CLINIC_REST_ADDR` is unset.
pub const DEFAULT_REST_ADDR: &str = "0.0.0.0:8080";

/// Environment variable holding the shared secret for mutating requests.
pub const API_KEY_VAR: &str = "API_KEY";

/// Environment variable naming the header that carries the API key.
pub const API_KEY_HEADER_VAR: &str = "API_KEY_HEADER";

/// Header checked for the API key when `API_KEY_HEADER` is unset.
pub const DEFAULT_API_KEY_HEADER: &str = "x-api-key";

/// Environment variable holding the MySQL connection URL.
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";

/// Environment variable holding the MySQL pool size.
pub const MAX_CONNECTIONS_VAR: &str = "DATABASE_MAX_CONNECTIONS";

pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Prefix of every clinic route except the health check.
pub const API_BASE_PATH: &str = "/api/v1";
