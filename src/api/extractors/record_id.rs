//! Record id path parameter.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use uuid::Uuid;

use crate::errors::AppError;

/// `:id` path segment parsed as a Uuid; anything else is `Invalid id.`
pub struct RecordId(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for RecordId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::Invalid("id".into()))?;

        Uuid::parse_str(&raw)
            .map(RecordId)
            .map_err(|_| AppError::Invalid("id".into()))
    }
}
