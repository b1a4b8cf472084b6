//! User domain entity and related types.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::rules::{past_date, rule_error, ALPHABETIC, NUMERIC};
use crate::config::{ADMIN_COOKIE, PATIENT_COOKIE, ROLE_ADMIN, ROLE_DOCTOR, ROLE_PATIENT};

/// User roles enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum UserRole {
    Patient,
    Admin,
    Doctor,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Patient => ROLE_PATIENT,
            UserRole::Admin => ROLE_ADMIN,
            UserRole::Doctor => ROLE_DOCTOR,
        }
    }

    /// Cookie a session for this role is carried in.
    ///
    /// Only admins get their own cookie; every other role shares the
    /// patient cookie.
    pub fn session_cookie(&self) -> &'static str {
        match self {
            UserRole::Admin => ADMIN_COOKIE,
            UserRole::Patient | UserRole::Doctor => PATIENT_COOKIE,
        }
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ROLE_PATIENT => Ok(UserRole::Patient),
            ROLE_ADMIN => Ok(UserRole::Admin),
            ROLE_DOCTOR => Ok(UserRole::Doctor),
            other => Err(format!("Unknown role: {}", other)),
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Male" => Ok(Gender::Male),
            "Female" => Ok(Gender::Female),
            "Other" => Ok(Gender::Other),
            _ => Err("Gender must be either Male, Female, or Other".to_string()),
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reference to an avatar held by the object storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Avatar {
    /// Storage identifier
    #[schema(example = "b1946ac9-2d5c-4e1a-9d6e-03a8e8f0c0a1.png")]
    pub public_id: String,
    /// Public URL of the stored image
    #[schema(example = "http://localhost:4000/uploads/b1946ac9-2d5c-4e1a-9d6e-03a8e8f0c0a1.png")]
    pub url: String,
}

/// User domain entity
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub nic: String,
    pub dob: NaiveDate,
    pub gender: Gender,
    pub password_hash: String,
    pub role: UserRole,
    pub doctor_department: Option<String>,
    pub doc_avatar: Option<Avatar>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Personal details shared by every account type.
#[derive(Debug, Clone)]
pub struct Registration {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub nic: String,
    pub dob: NaiveDate,
    pub gender: Gender,
    pub password: String,
}

/// A user about to be persisted, still holding the plain text password.
///
/// Validation covers every column constraint of the `users` table; the
/// credential pipeline validates, hashes, then inserts.
#[derive(Debug, Clone, Validate)]
#[validate(schema(function = "doctor_fields_match_role", skip_on_field_errors = false))]
pub struct NewUser {
    #[validate(
        length(min = 2, max = 10, message = "First Name must contain between 2 and 10 characters"),
        regex(path = *ALPHABETIC, message = "First Name should contain only alphabetic characters")
    )]
    pub first_name: String,
    #[validate(
        length(min = 2, max = 10, message = "Last Name must contain between 2 and 10 characters"),
        regex(path = *ALPHABETIC, message = "Last Name should contain only alphabetic characters")
    )]
    pub last_name: String,
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
    #[validate(
        length(min = 9, max = 15, message = "Phone number must contain between 9 and 15 characters"),
        regex(path = *NUMERIC, message = "Phone number should contain only numeric characters")
    )]
    pub phone: String,
    #[validate(length(equal = 13, message = "NIC number must be 13 characters long"))]
    pub nic: String,
    #[validate(custom(function = "past_date"))]
    pub dob: NaiveDate,
    pub gender: Gender,
    #[validate(length(min = 8, message = "Password must be at least 8 characters long"))]
    pub password: String,
    pub role: UserRole,
    pub doctor_department: Option<String>,
    pub doc_avatar: Option<Avatar>,
}

impl NewUser {
    /// Build an account of the given role from registration details.
    pub fn from_registration(registration: Registration, role: UserRole) -> Self {
        Self {
            first_name: registration.first_name,
            last_name: registration.last_name,
            email: registration.email,
            phone: registration.phone,
            nic: registration.nic,
            dob: registration.dob,
            gender: registration.gender,
            password: registration.password,
            role,
            doctor_department: None,
            doc_avatar: None,
        }
    }

    /// Build a doctor account; the avatar is attached once uploaded.
    pub fn doctor(registration: Registration, department: String) -> Self {
        let mut user = Self::from_registration(registration, UserRole::Doctor);
        user.doctor_department = Some(department);
        user
    }
}

fn doctor_fields_match_role(user: &NewUser) -> Result<(), ValidationError> {
    match user.role {
        UserRole::Doctor if user.doctor_department.is_none() => Err(rule_error(
            "doctor_department",
            "Doctor Department is required for doctors",
        )),
        UserRole::Patient | UserRole::Admin
            if user.doctor_department.is_some() || user.doc_avatar.is_some() =>
        {
            Err(rule_error(
                "doctor_fields",
                "Only doctors may have a department or avatar",
            ))
        }
        _ => Ok(()),
    }
}

/// User response (safe to return to client)
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    /// Unique user identifier
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    #[serde(rename = "_id")]
    pub id: Uuid,
    #[schema(example = "Jane")]
    pub first_name: String,
    #[schema(example = "Perera")]
    pub last_name: String,
    #[schema(example = "jane@example.com")]
    pub email: String,
    #[schema(example = "0771234567")]
    pub phone: String,
    #[schema(example = "1234567890123")]
    pub nic: String,
    pub dob: NaiveDate,
    pub gender: Gender,
    pub role: UserRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "Cardiology")]
    pub doctor_department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc_avatar: Option<Avatar>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            phone: user.phone,
            nic: user.nic,
            dob: user.dob,
            gender: user.gender,
            role: user.role,
            doctor_department: user.doctor_department,
            doc_avatar: user.doc_avatar,
            created_at: user.created_at,
        }
    }
}
