//! API middleware.

mod auth;

pub use auth::{require_admin, require_patient, CurrentUser};
