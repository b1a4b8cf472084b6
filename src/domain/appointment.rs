//! Appointment domain entity and related types.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::rules::{not_blank, optional_date, NUMERIC};
use super::user::Gender;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum AppointmentStatus {
    #[default]
    Pending,
    Accepted,
    Rejected,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "Pending",
            AppointmentStatus::Accepted => "Accepted",
            AppointmentStatus::Rejected => "Rejected",
        }
    }
}

impl FromStr for AppointmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(AppointmentStatus::Pending),
            "Accepted" => Ok(AppointmentStatus::Accepted),
            "Rejected" => Ok(AppointmentStatus::Rejected),
            other => Err(format!("Unknown appointment status: {}", other)),
        }
    }
}

/// Doctor name as typed by the patient when booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DoctorName {
    #[schema(example = "Nimal")]
    pub first_name: String,
    #[schema(example = "Silva")]
    pub last_name: String,
}

/// Appointment domain entity
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub nic: String,
    pub dob: NaiveDate,
    pub gender: Gender,
    pub appointment_date: NaiveDate,
    pub department: String,
    pub doctor: DoctorName,
    #[serde(rename = "doctor_id")]
    pub doctor_id: Uuid,
    #[serde(rename = "patient_id")]
    pub patient_id: Uuid,
    pub has_visited: bool,
    pub address: String,
    pub status: AppointmentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Booking details submitted by a patient.
#[derive(Debug, Clone)]
pub struct AppointmentRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub nic: String,
    pub dob: NaiveDate,
    pub gender: Gender,
    pub appointment_date: NaiveDate,
    pub department: String,
    pub doctor: DoctorName,
    pub has_visited: bool,
    pub address: String,
}

/// An appointment resolved against a doctor, ready to insert.
#[derive(Debug, Clone, Validate)]
pub struct NewAppointment {
    #[validate(custom(function = "not_blank"))]
    pub first_name: String,
    #[validate(custom(function = "not_blank"))]
    pub last_name: String,
    #[validate(email(message = "Please provide a valid email address."))]
    pub email: String,
    #[validate(
        length(min = 9, max = 15, message = "Please provide a valid phone number."),
        regex(path = *NUMERIC, message = "Please provide a valid phone number.")
    )]
    pub phone: String,
    #[validate(custom(function = "not_blank"))]
    pub nic: String,
    pub dob: NaiveDate,
    pub gender: Gender,
    pub appointment_date: NaiveDate,
    #[validate(custom(function = "not_blank"))]
    pub department: String,
    pub doctor: DoctorName,
    pub doctor_id: Uuid,
    pub patient_id: Uuid,
    pub has_visited: bool,
    #[validate(custom(function = "not_blank"))]
    pub address: String,
    pub status: AppointmentStatus,
}

impl NewAppointment {
    /// Bind a booking request to the resolved doctor and the booking patient.
    pub fn new(request: AppointmentRequest, doctor_id: Uuid, patient_id: Uuid) -> Self {
        Self {
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email,
            phone: request.phone,
            nic: request.nic,
            dob: request.dob,
            gender: request.gender,
            appointment_date: request.appointment_date,
            department: request.department,
            doctor: request.doctor,
            doctor_id,
            patient_id,
            has_visited: request.has_visited,
            address: request.address,
            status: AppointmentStatus::default(),
        }
    }
}

/// Partial update applied by an admin. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentChanges {
    #[validate(custom(function = "not_blank"))]
    pub first_name: Option<String>,
    #[validate(custom(function = "not_blank"))]
    pub last_name: Option<String>,
    #[validate(email(message = "Please provide a valid email address."))]
    pub email: Option<String>,
    #[validate(
        length(min = 9, max = 15, message = "Please provide a valid phone number."),
        regex(path = *NUMERIC, message = "Please provide a valid phone number.")
    )]
    pub phone: Option<String>,
    #[validate(custom(function = "not_blank"))]
    pub nic: Option<String>,
    #[serde(default, deserialize_with = "optional_date")]
    #[schema(value_type = Option<String>, example = "1990-05-17")]
    pub dob: Option<NaiveDate>,
    pub gender: Option<Gender>,
    #[serde(default, deserialize_with = "optional_date")]
    #[schema(value_type = Option<String>, example = "2030-01-10")]
    pub appointment_date: Option<NaiveDate>,
    #[validate(custom(function = "not_blank"))]
    pub department: Option<String>,
    pub has_visited: Option<bool>,
    #[validate(custom(function = "not_blank"))]
    pub address: Option<String>,
    #[schema(example = "Accepted")]
    pub status: Option<AppointmentStatus>,
}

impl AppointmentChanges {
    /// Apply the changes to an existing appointment.
    pub fn apply(self, appointment: &mut Appointment) {
        if let Some(v) = self.first_name {
            appointment.first_name = v;
        }
        if let Some(v) = self.last_name {
            appointment.last_name = v;
        }
        if let Some(v) = self.email {
            appointment.email = v;
        }
        if let Some(v) = self.phone {
            appointment.phone = v;
        }
        if let Some(v) = self.nic {
            appointment.nic = v;
        }
        if let Some(v) = self.dob {
            appointment.dob = v;
        }
        if let Some(v) = self.gender {
            appointment.gender = v;
        }
        if let Some(v) = self.appointment_date {
            appointment.appointment_date = v;
        }
        if let Some(v) = self.department {
            appointment.department = v;
        }
        if let Some(v) = self.has_visited {
            appointment.has_visited = v;
        }
        if let Some(v) = self.address {
            appointment.address = v;
        }
        if let Some(v) = self.status {
            appointment.status = v;
        }
        appointment.updated_at = Utc::now();
    }
}
