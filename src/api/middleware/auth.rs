//! Cookie session guards.
//!
//! Each guard reads its role's cookie, verifies the token, reloads the
//! user and checks the live role before the handler runs.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;

use crate::api::AppState;
use crate::domain::{User, UserRole};
use crate::errors::AppError;

/// The user a guard admitted, available to handlers as an extension.
#[derive(Clone, Debug)]
pub struct CurrentUser(pub User);

/// Admit only admins carrying an `adminToken` cookie.
pub async fn require_admin(
    State(state): State<AppState>,
    jar: CookieJar,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    guard(&state, &jar, UserRole::Admin, request, next).await
}

/// Admit only patients carrying a `patientToken` cookie.
pub async fn require_patient(
    State(state): State<AppState>,
    jar: CookieJar,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    guard(&state, &jar, UserRole::Patient, request, next).await
}

async fn guard(
    state: &AppState,
    jar: &CookieJar,
    role: UserRole,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = jar
        .get(role.session_cookie())
        .map(|cookie| cookie.value())
        .filter(|value| !value.is_empty())
        .ok_or(AppError::Unauthenticated)?;

    let user = state.services.auth().authenticate(token, role).await?;
    tracing::debug!(user_id = %user.id, role = %user.role, "Session accepted");

    request.extensions_mut().insert(CurrentUser(user));
    Ok(next.run(request).await)
}
