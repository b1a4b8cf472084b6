//! Appointment handlers.

use axum::{
    extract::State,
    response::Json,
    routing::{delete, get, post, put},
    Extension, Router,
};
use serde::Deserialize;
use utoipa::ToSchema;

use super::fields::{parse_date, parse_gender, required};
use crate::api::extractors::{Payload, RecordId, ValidatedJson};
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{Appointment, AppointmentChanges, AppointmentRequest, DoctorName};
use crate::errors::AppResult;
use crate::types::{ApiResponse, Created};

/// Booking form submitted by a patient
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookAppointmentRequest {
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
    #[schema(example = "2030-01-10")]
    pub appointment_date: Option<String>,
    #[schema(example = "Cardiology")]
    pub department: Option<String>,
    #[serde(rename = "doctor_firstName")]
    #[schema(example = "Nimal")]
    pub doctor_first_name: Option<String>,
    #[serde(rename = "doctor_lastName")]
    #[schema(example = "Silva")]
    pub doctor_last_name: Option<String>,
    pub has_visited: Option<bool>,
    #[schema(example = "12 Galle Road, Colombo")]
    pub address: Option<String>,
}

impl BookAppointmentRequest {
    fn into_request(self) -> AppResult<AppointmentRequest> {
        let first_name = required(self.first_name)?;
        let last_name = required(self.last_name)?;
        let email = required(self.email)?;
        let phone = required(self.phone)?;
        let nic = required(self.nic)?;
        let dob = required(self.dob)?;
        let gender = required(self.gender)?;
        let appointment_date = required(self.appointment_date)?;
        let department = required(self.department)?;
        let doctor = DoctorName {
            first_name: required(self.doctor_first_name)?,
            last_name: required(self.doctor_last_name)?,
        };
        let address = required(self.address)?;

        Ok(AppointmentRequest {
            first_name,
            last_name,
            email,
            phone,
            nic,
            dob: parse_date("dob", &dob)?,
            gender: parse_gender(&gender)?,
            appointment_date: parse_date("appointmentDate", &appointment_date)?,
            department,
            doctor,
            has_visited: self.has_visited.unwrap_or(false),
            address,
        })
    }
}

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/getall", get(list_appointments))
        .route("/update/:id", put(update_appointment))
        .route("/delete/:id", delete(delete_appointment))
}

pub fn patient_routes() -> Router<AppState> {
    Router::new().route("/post/appointment", post(book_appointment))
}

/// Book an appointment with a named doctor
#[utoipa::path(
    post,
    path = "/api/v1/appointment/post/appointment",
    tag = "Appointments",
    request_body = BookAppointmentRequest,
    responses(
        (status = 201, description = "Appointment created", body = Appointment),
        (status = 400, description = "Missing or invalid field"),
        (status = 404, description = "No doctor with that name in the department")
    ),
    security(("patient_cookie" = []))
)]
pub async fn book_appointment(
    State(state): State<AppState>,
    Extension(CurrentUser(patient)): Extension<CurrentUser>,
    Payload(payload): Payload<BookAppointmentRequest>,
) -> AppResult<Created<Appointment>> {
    let request = payload.into_request()?;
    let appointment = state
        .services
        .appointments()
        .create(request, patient.id)
        .await?;

    Ok(Created(ApiResponse::with_message(
        appointment,
        "Appointment created successfully",
    )))
}

/// List every appointment
#[utoipa::path(
    get,
    path = "/api/v1/appointment/getall",
    tag = "Appointments",
    responses(
        (status = 200, description = "All appointments", body = Vec<Appointment>)
    ),
    security(("admin_cookie" = []))
)]
pub async fn list_appointments(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<Appointment>>>> {
    let appointments = state.services.appointments().list().await?;
    Ok(Json(ApiResponse::success(appointments)))
}

/// Update any subset of an appointment's fields
#[utoipa::path(
    put,
    path = "/api/v1/appointment/update/{id}",
    tag = "Appointments",
    params(("id" = String, Path, description = "Appointment ID (UUID)")),
    request_body = AppointmentChanges,
    responses(
        (status = 200, description = "Updated appointment", body = Appointment),
        (status = 400, description = "Malformed id or invalid field"),
        (status = 404, description = "Appointment not found")
    ),
    security(("admin_cookie" = []))
)]
pub async fn update_appointment(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    ValidatedJson(changes): ValidatedJson<AppointmentChanges>,
) -> AppResult<Json<ApiResponse<Appointment>>> {
    let appointment = state.services.appointments().update(id, changes).await?;

    Ok(Json(ApiResponse::with_message(
        appointment,
        "Appointment status updated successfully",
    )))
}

/// Delete an appointment
#[utoipa::path(
    delete,
    path = "/api/v1/appointment/delete/{id}",
    tag = "Appointments",
    params(("id" = String, Path, description = "Appointment ID (UUID)")),
    responses(
        (status = 200, description = "Appointment deleted"),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "Appointment not found")
    ),
    security(("admin_cookie" = []))
)]
pub async fn delete_appointment(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> AppResult<Json<ApiResponse<()>>> {
    state.services.appointments().delete(id).await?;
    Ok(Json(ApiResponse::message("Appointment deleted successfully")))
}
