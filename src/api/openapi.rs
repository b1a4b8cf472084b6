//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{
    appointment_handler, auth_handler, message_handler, user_handler, RegistrationFields,
};
use crate::config::{ADMIN_COOKIE, PATIENT_COOKIE};
use crate::domain::{
    Appointment, AppointmentChanges, AppointmentStatus, Avatar, DoctorName, Gender, Message,
    UserResponse, UserRole,
};
use crate::types::SessionResponse;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Hospital Management API",
        version = "0.1.0",
        description = "Patients, doctors, appointments and contact messages for a hospital front desk"
    ),
    servers(
        (url = "http://localhost:4000", description = "Local development server")
    ),
    paths(
        // Users
        auth_handler::register,
        auth_handler::login,
        auth_handler::logout_admin,
        auth_handler::logout_patient,
        user_handler::list_doctors,
        user_handler::current_user,
        user_handler::add_admin,
        user_handler::add_doctor,
        // Appointments
        appointment_handler::book_appointment,
        appointment_handler::list_appointments,
        appointment_handler::update_appointment,
        appointment_handler::delete_appointment,
        // Messages
        message_handler::send_message,
        message_handler::list_messages,
    ),
    components(
        schemas(
            // Domain types
            UserRole,
            Gender,
            Avatar,
            UserResponse,
            AppointmentStatus,
            DoctorName,
            Appointment,
            AppointmentChanges,
            Message,
            // Request and response bodies
            RegistrationFields,
            SessionResponse,
            auth_handler::RegisterRequest,
            auth_handler::LoginRequest,
            user_handler::DoctorForm,
            appointment_handler::BookAppointmentRequest,
            message_handler::SendMessageRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Users", description = "Registration, sessions and staff provisioning"),
        (name = "Appointments", description = "Booking and administration of appointments"),
        (name = "Messages", description = "Contact form")
    )
)]
pub struct ApiDoc;

/// Session cookie security schemes
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "admin_cookie",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(ADMIN_COOKIE))),
            );
            components.add_security_scheme(
                "patient_cookie",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(PATIENT_COOKIE))),
            );
        }
    }
}
