//! Input validation utilities.
//!
//! Required-field checks are expressed as a list of [`RequiredField`] descriptors so that every
//! entity request shares one validator instead of carrying its own copy of the rules.

use crate::{ClinicError, ClinicResult, Id};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer};

/// A single required field and the value supplied for it.
#[derive(Debug, Clone, Copy)]
pub enum RequiredField<'a> {
    /// Text that must contain at least one non-whitespace character.
    Text(&'static str, &'a str),
    /// A foreign reference that must be `>= 1`.
    Reference(&'static str, Id),
    /// A timestamp that must be supplied.
    Timestamp(&'static str, Option<&'a DateTime<Utc>>),
}

impl RequiredField<'_> {
    fn name(&self) -> &'static str {
        match self {
            RequiredField::Text(name, _)
            | RequiredField::Reference(name, _)
            | RequiredField::Timestamp(name, _) => name,
        }
    }

    fn is_satisfied(&self) -> bool {
        match self {
            RequiredField::Text(_, value) => !value.trim().is_empty(),
            RequiredField::Reference(_, value) => *value >= 1,
            RequiredField::Timestamp(_, value) => value.is_some(),
        }
    }
}

/// Implemented by request types that carry required fields.
pub trait Validate {
    fn required_fields(&self) -> Vec<RequiredField<'_>>;

    /// Validates every required field, reporting all missing ones at once.
    ///
    /// # Errors
    ///
    /// Returns [`ClinicError::Validation`] naming the missing fields.
    fn validate(&self) -> ClinicResult<()> {
        require_fields(&self.required_fields())
    }
}

/// Checks a list of required field descriptors.
///
/// # Errors
///
/// Returns [`ClinicError::Validation`] listing every field that is empty, zero or absent.
pub fn require_fields(fields: &[RequiredField<'_>]) -> ClinicResult<()> {
    let missing: Vec<&str> = fields
        .iter()
        .filter(|field| !field.is_satisfied())
        .map(RequiredField::name)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ClinicError::Validation(format!(
            "required fields missing or empty: {}",
            missing.join(", ")
        )))
    }
}

/// Parses a calendar date in `YYYY-MM-DD` form.
pub fn parse_date(field: &str, value: &str) -> ClinicResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|e| {
        ClinicError::Validation(format!("{field} must be a YYYY-MM-DD date: {e}"))
    })
}

/// Parses a timestamp given either as RFC 3339 or as `YYYY-MM-DD HH:MM` (taken as UTC).
pub fn parse_timestamp(field: &str, value: &str) -> ClinicResult<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Ok(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M")
        .map(|naive| Utc.from_utc_datetime(&naive))
        .map_err(|e| {
            ClinicError::Validation(format!(
                "{field} must be RFC 3339 or YYYY-MM-DD HH:MM: {e}"
            ))
        })
}

/// Serde adapter for optional `fecha_hora` body fields, accepting both [`parse_timestamp`] layouts.
pub(crate) fn deserialize_optional_timestamp<'de, D>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) => parse_timestamp("fecha_hora", &raw)
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Parses a decimal identity.
pub fn parse_id(field: &str, value: &str) -> ClinicResult<Id> {
    value
        .trim()
        .parse::<Id>()
        .map_err(|e| ClinicError::Validation(format!("{field} must be an integer: {e}")))
}
