//! Session handlers: registration, login and logout.

use axum::{
    extract::State,
    response::Json,
    routing::{get, post},
    Router,
};
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use utoipa::ToSchema;

use super::fields::{required, required_secret, RegistrationFields};
use crate::api::cookies::{cleared_cookie, session_cookie};
use crate::api::extractors::Payload;
use crate::api::AppState;
use crate::config::{ADMIN_COOKIE, PATIENT_COOKIE};
use crate::domain::rules::present;
use crate::domain::UserRole;
use crate::errors::{AppError, AppResult};
use crate::services::Session;
use crate::types::{ApiResponse, SessionResponse};

/// Patient self-registration
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(flatten)]
    pub fields: RegistrationFields,
    /// Optional; must be `Patient` when given
    #[schema(example = "Patient")]
    pub role: Option<String>,
}

/// User login request
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "jane@example.com")]
    pub email: Option<String>,
    #[schema(example = "SecurePass123")]
    pub password: Option<String>,
    /// When given, must match the account's role
    #[schema(example = "Patient")]
    pub role: Option<String>,
}

/// Routes reachable without a session
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/patient/register", post(register))
        .route("/login", post(login))
}

pub fn admin_routes() -> Router<AppState> {
    Router::new().route("/admin/logout", get(logout_admin))
}

pub fn patient_routes() -> Router<AppState> {
    Router::new().route("/user/logout", get(logout_patient))
}

/// Set the role's cookie and render the session body.
fn respond(
    state: &AppState,
    jar: CookieJar,
    session: Session,
    message: &str,
) -> (CookieJar, Json<SessionResponse>) {
    let cookie = session_cookie(
        session.user.role.session_cookie(),
        session.token.clone(),
        state.config.cookie_expire_days,
    );

    let body = SessionResponse {
        success: true,
        message: message.to_string(),
        user: session.user.into(),
        token: session.token,
    };

    (jar.add(cookie), Json(body))
}

/// Register a new patient
#[utoipa::path(
    post,
    path = "/api/v1/user/patient/register",
    tag = "Users",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Patient registered, patientToken cookie set", body = SessionResponse),
        (status = 400, description = "Missing field, invalid field or email already registered")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    Payload(payload): Payload<RegisterRequest>,
) -> AppResult<(CookieJar, Json<SessionResponse>)> {
    let registration = payload.fields.into_registration()?;

    if let Some(role) = present(payload.role) {
        if role.parse::<UserRole>() != Ok(UserRole::Patient) {
            return Err(AppError::bad_request("Invalid role"));
        }
    }

    let session = state.services.auth().register_patient(registration).await?;
    Ok(respond(&state, jar, session, "User Registered"))
}

/// Log in any role
#[utoipa::path(
    post,
    path = "/api/v1/user/login",
    tag = "Users",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Session opened; adminToken or patientToken cookie set", body = SessionResponse),
        (status = 400, description = "Missing email or password"),
        (status = 401, description = "Invalid email or password, or role mismatch")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Payload(payload): Payload<LoginRequest>,
) -> AppResult<(CookieJar, Json<SessionResponse>)> {
    let email = required(payload.email)?;
    let password = required_secret(payload.password)?;
    let role = present(payload.role)
        .map(|r| r.parse::<UserRole>().map_err(|_| AppError::InvalidRole))
        .transpose()?;

    let session = state
        .services
        .auth()
        .login(&email, &password, role)
        .await?;
    Ok(respond(&state, jar, session, "User logged in successfully"))
}

/// Clear the admin session cookie
#[utoipa::path(
    get,
    path = "/api/v1/user/admin/logout",
    tag = "Users",
    responses(
        (status = 200, description = "adminToken cleared"),
        (status = 400, description = "Not authenticated"),
        (status = 403, description = "Not an admin")
    ),
    security(("admin_cookie" = []))
)]
pub async fn logout_admin(jar: CookieJar) -> (CookieJar, Json<ApiResponse<()>>) {
    (
        jar.add(cleared_cookie(ADMIN_COOKIE)),
        Json(ApiResponse::message("Admin logged out successfully")),
    )
}

/// Clear the patient session cookie
#[utoipa::path(
    get,
    path = "/api/v1/user/user/logout",
    tag = "Users",
    responses(
        (status = 200, description = "patientToken cleared"),
        (status = 400, description = "Not authenticated"),
        (status = 403, description = "Not a patient")
    ),
    security(("patient_cookie" = []))
)]
pub async fn logout_patient(jar: CookieJar) -> (CookieJar, Json<ApiResponse<()>>) {
    (
        jar.add(cleared_cookie(PATIENT_COOKIE)),
        Json(ApiResponse::message("User logged out successfully")),
    )
}
