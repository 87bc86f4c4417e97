/// Why a request failed API-key authentication.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("missing API key")]
    Missing,
    #[error("invalid API key")]
    Invalid,
}

/// Validates the provided API key against the expected key resolved at startup.
///
/// Returns `Ok(())` if the key matches exactly, or an error if it is missing or wrong.
pub fn validate_api_key(provided: Option<&str>, expected: &str) -> Result<(), AuthError> {
    match provided {
        None => Err(AuthError::Missing),
        Some(key) if key == expected => Ok(()),
        Some(_) => Err(AuthError::Invalid),
    }
}
