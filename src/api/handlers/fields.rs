//! Raw form fields shared by the registration-style endpoints.
//!
//! Bodies are deserialized with every field optional so that an absent
//! or blank field yields "Please fill out all fields." rather than a
//! serde error.

use std::collections::HashMap;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::domain::rules::{self, present};
use crate::domain::{Gender, Registration};
use crate::errors::{AppError, AppResult};

pub(crate) fn required(value: Option<String>) -> AppResult<String> {
    present(value).ok_or(AppError::MissingFields)
}

/// Presence check for secrets: the value is kept verbatim, whitespace included.
pub(crate) fn required_secret(value: Option<String>) -> AppResult<String> {
    value.filter(|v| !v.is_empty()).ok_or(AppError::MissingFields)
}

/// Accept `YYYY-MM-DD` or a full RFC 3339 timestamp.
pub(crate) fn parse_date(field: &str, value: &str) -> AppResult<NaiveDate> {
    rules::parse_date(value).ok_or_else(|| AppError::Invalid(field.to_string()))
}

pub(crate) fn parse_gender(value: &str) -> AppResult<Gender> {
    Gender::from_str(value).map_err(AppError::validation)
}

/// Personal details as submitted by a client.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationFields {
    #[schema(example = "Jane")]
    pub first_name: Option<String>,
    #[schema(example = "Perera")]
    pub last_name: Option<String>,
    #[schema(example = "jane@example.com")]
    pub email: Option<String>,
    #[schema(example = "0771234567")]
    pub phone: Option<String>,
    #[schema(example = "1234567890123")]
    pub nic: Option<String>,
    #[schema(example = "1990-05-17")]
    pub dob: Option<String>,
    #[schema(example = "Female")]
    pub gender: Option<String>,
    #[schema(example = "SecurePass123", min_length = 8)]
    pub password: Option<String>,
}

impl RegistrationFields {
    /// Lift text fields out of a multipart form.
    pub fn from_form(form: &mut HashMap<String, String>) -> Self {
        Self {
            first_name: form.remove("firstName"),
            last_name: form.remove("lastName"),
            email: form.remove("email"),
            phone: form.remove("phone"),
            nic: form.remove("nic"),
            dob: form.remove("dob"),
            gender: form.remove("gender"),
            password: form.remove("password"),
        }
    }

    /// Require every field, then parse the typed ones.
    pub fn into_registration(self) -> AppResult<Registration> {
        let first_name = required(self.first_name)?;
        let last_name = required(self.last_name)?;
        let email = required(self.email)?;
        let phone = required(self.phone)?;
        let nic = required(self.nic)?;
        let dob = required(self.dob)?;
        let gender = required(self.gender)?;
        let password = required_secret(self.password)?;

        Ok(Registration {
            first_name,
            last_name,
            email,
            phone,
            nic,
            dob: parse_date("dob", &dob)?,
            gender: parse_gender(&gender)?,
            password,
        })
    }
}
