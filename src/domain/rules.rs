//! Field rules shared by the validated domain inputs.

use std::borrow::Cow;

use chrono::{DateTime, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{de::Error as _, Deserialize, Deserializer};
use validator::ValidationError;

/// Letters only, as required for person names.
pub static ALPHABETIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z]+$").unwrap());

/// Digits only, as required for phone numbers.
pub static NUMERIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+$").unwrap());

/// Reject dates of birth that are today or later.
pub fn past_date(date: &NaiveDate) -> Result<(), ValidationError> {
    if *date < Utc::now().date_naive() {
        Ok(())
    } else {
        Err(rule_error("past_date", "Date of Birth cannot be in the future"))
    }
}

/// Reject strings that are empty once surrounding whitespace is removed.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(rule_error("not_blank", "Field cannot be blank"))
    } else {
        Ok(())
    }
}

pub(crate) fn rule_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

/// Accept `YYYY-MM-DD` or a full RFC 3339 timestamp, keeping the date.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.date_naive()))
}

/// `deserialize_with` adapter for optional dates in either accepted format.
pub fn optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)?
        .map(|raw| parse_date(&raw).ok_or_else(|| D::Error::custom(format!("invalid date `{}`", raw))))
        .transpose()
}

/// Trim a submitted value, treating blank input as absent.
pub fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
