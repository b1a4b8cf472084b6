//! Centralized error handling.
//!
//! Every failure raised by a guard, handler or service is an [`AppError`];
//! its `IntoResponse` impl is the single point that turns it into the
//! client-facing `{ "success": false, "message": ... }` body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use jsonwebtoken::errors::ErrorKind;
use sea_orm::{DbErr, SqlErr};
use serde::Serialize;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Request shape
    #[error("Please fill out all fields.")]
    MissingFields,

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("Invalid {0}.")]
    Invalid(String),

    // Uniqueness
    #[error("Duplicate {0} entered.")]
    Duplicate(String),

    #[error("{0}")]
    AlreadyExists(String),

    // Authentication & Authorization
    #[error("You are not authorized to access this route.")]
    Unauthenticated,

    #[error("JSON web token is invalid.")]
    InvalidToken,

    #[error("JSON web token is expired.")]
    TokenExpired,

    #[error("{0} not authorized for this resource")]
    Forbidden(String),

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Invalid role")]
    InvalidRole,

    // Resource errors
    #[error("{0}")]
    NotFound(String),

    // External service errors
    #[error("Avatar upload failed")]
    Upload(String),

    #[error("Database error")]
    Database(DbErr),

    // Internal
    #[error("Internal server error")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
struct ErrorResponse {
    success: bool,
    message: String,
}

impl AppError {
    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingFields
            | AppError::Validation(_)
            | AppError::BadRequest(_)
            | AppError::Invalid(_)
            | AppError::Duplicate(_)
            | AppError::AlreadyExists(_)
            | AppError::Unauthenticated
            | AppError::InvalidToken
            | AppError::TokenExpired => StatusCode::BAD_REQUEST,
            AppError::InvalidCredentials | AppError::InvalidRole => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Upload(_) | AppError::Database(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get user-facing message (hides internal details)
    pub fn user_message(&self) -> String {
        match self {
            AppError::Upload(detail) => {
                tracing::error!(detail = %detail, "Avatar upload failed");
                self.to_string()
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "A database error occurred".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "Internal server error".to_string()
            }
            _ => self.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            success: false,
            message: self.user_message(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => {
                AppError::Duplicate(unique_field(&detail).to_string())
            }
            _ => AppError::Database(err),
        }
    }
}

impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            ErrorKind::ExpiredSignature => AppError::TokenExpired,
            _ => AppError::InvalidToken,
        }
    }
}

/// Best-effort name of the column a unique violation was raised on.
fn unique_field(detail: &str) -> &'static str {
    if detail.contains("email") {
        "email"
    } else {
        "value"
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self, entity: &str) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self, entity: &str) -> AppResult<T> {
        self.ok_or_else(|| AppError::not_found(entity))
    }
}

/// Convenience constructors
impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        AppError::BadRequest(msg.into())
    }

    /// `"<entity> not found."`
    pub fn not_found(entity: impl std::fmt::Display) -> Self {
        AppError::NotFound(format!("{} not found.", entity))
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}

/// Join validator failures into a single client message.
///
/// Fields are visited in name order so the output is stable.
pub fn format_validation_errors(errors: &validator::ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|(a, _), (b, _)| a.cmp(b));

    fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field))
            })
        })
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(format_validation_errors(&errors))
    }
}
