//! User directory and provisioning handlers.

use std::collections::HashMap;

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    response::Json,
    routing::{get, post},
    Extension, Router,
};
use utoipa::ToSchema;

use super::fields::{required, RegistrationFields};
use crate::api::extractors::Payload;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::config::{ALLOWED_AVATAR_MIME_TYPES, AVATAR_FIELD};
use crate::domain::UserResponse;
use crate::errors::{AppError, AppResult};
use crate::infra::UploadedFile;
use crate::types::{ApiResponse, Created};

/// Multipart form accepted by `/user/doctor/addNew`
#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct DoctorForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub nic: String,
    #[schema(example = "1985-02-11")]
    pub dob: String,
    pub gender: String,
    pub password: String,
    #[schema(example = "Cardiology")]
    pub doctor_department: String,
    /// jpg, jpeg, webp or png image
    #[schema(value_type = String, format = Binary)]
    pub doc_avatar: Vec<u8>,
}

pub fn public_routes() -> Router<AppState> {
    Router::new().route("/doctors", get(list_doctors))
}

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/addNew", post(add_admin))
        .route("/admin/me", get(current_user))
        .route("/doctor/addNew", post(add_doctor))
}

pub fn patient_routes() -> Router<AppState> {
    Router::new().route("/patient/me", get(current_user))
}

/// List all doctors
#[utoipa::path(
    get,
    path = "/api/v1/user/doctors",
    tag = "Users",
    responses(
        (status = 200, description = "Every doctor account", body = Vec<UserResponse>)
    )
)]
pub async fn list_doctors(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<UserResponse>>>> {
    let doctors = state.services.users().list_doctors().await?;
    let doctors = doctors.into_iter().map(UserResponse::from).collect();

    Ok(Json(ApiResponse::with_message(
        doctors,
        "Doctors fetched successfully",
    )))
}

/// Get the signed-in user
#[utoipa::path(
    get,
    path = "/api/v1/user/admin/me",
    tag = "Users",
    responses(
        (status = 200, description = "The user behind the session cookie", body = UserResponse),
        (status = 400, description = "Not authenticated"),
        (status = 403, description = "Wrong role for this route")
    ),
    security(("admin_cookie" = []), ("patient_cookie" = []))
)]
pub async fn current_user(
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Json<ApiResponse<UserResponse>> {
    Json(ApiResponse::with_message(
        UserResponse::from(user),
        "User details fetched successfully",
    ))
}

/// Provision another admin
#[utoipa::path(
    post,
    path = "/api/v1/user/admin/addNew",
    tag = "Users",
    request_body = RegistrationFields,
    responses(
        (status = 200, description = "Admin created", body = UserResponse),
        (status = 400, description = "Missing field, invalid field or email taken"),
        (status = 403, description = "Not an admin")
    ),
    security(("admin_cookie" = []))
)]
pub async fn add_admin(
    State(state): State<AppState>,
    Extension(CurrentUser(actor)): Extension<CurrentUser>,
    Payload(fields): Payload<RegistrationFields>,
) -> AppResult<Json<ApiResponse<UserResponse>>> {
    let registration = fields.into_registration()?;
    let admin = state.services.auth().add_admin(registration).await?;

    tracing::info!(admin_id = %admin.id, added_by = %actor.id, "Admin added");
    Ok(Json(ApiResponse::with_message(
        admin.into(),
        "Admin added successfully",
    )))
}

/// Provision a doctor with an avatar
#[utoipa::path(
    post,
    path = "/api/v1/user/doctor/addNew",
    tag = "Users",
    request_body(content = DoctorForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Doctor created", body = UserResponse),
        (status = 400, description = "Avatar missing or wrong format, missing field, invalid field or email taken"),
        (status = 403, description = "Not an admin"),
        (status = 500, description = "Avatar could not be stored")
    ),
    security(("admin_cookie" = []))
)]
pub async fn add_doctor(
    State(state): State<AppState>,
    Extension(CurrentUser(actor)): Extension<CurrentUser>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Created<UserResponse>> {
    let multipart = multipart.map_err(|e| AppError::validation(e.body_text()))?;
    let (mut form, avatar) = read_form(multipart).await?;
    let avatar = avatar.ok_or_else(|| AppError::bad_request("Doctor Avatar is Required"))?;
    if !ALLOWED_AVATAR_MIME_TYPES.contains(&avatar.content_type.as_str()) {
        return Err(AppError::bad_request("Invalid Doctor Avatar Format"));
    }

    let registration = RegistrationFields::from_form(&mut form);
    let department = required(form.remove("doctorDepartment"))?;
    let registration = registration.into_registration()?;

    let doctor = state
        .services
        .auth()
        .add_doctor(registration, department, avatar)
        .await?;

    tracing::info!(doctor_id = %doctor.id, added_by = %actor.id, "Doctor added");
    Ok(Created(ApiResponse::with_message(
        doctor.into(),
        "Doctor Registered successfully",
    )))
}

/// Split a multipart body into text fields and the avatar file.
async fn read_form(
    mut multipart: Multipart,
) -> AppResult<(HashMap<String, String>, Option<UploadedFile>)> {
    let mut form = HashMap::new();
    let mut avatar = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(e.body_text()))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        if name == AVATAR_FIELD {
            let file_name = field.file_name().map(str::to_string);
            let content_type = field.content_type().unwrap_or_default().to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::validation(e.body_text()))?;

            if !bytes.is_empty() {
                avatar = Some(UploadedFile {
                    file_name,
                    content_type,
                    bytes,
                });
            }
        } else {
            let value = field
                .text()
                .await
                .map_err(|e| AppError::validation(e.body_text()))?;
            form.insert(name, value);
        }
    }

    Ok((form, avatar))
}
