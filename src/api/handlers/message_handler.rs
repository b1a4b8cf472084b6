//! Contact message handlers.

use axum::{
    extract::State,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;

use super::fields::required;
use crate::api::extractors::Payload;
use crate::api::AppState;
use crate::domain::{Message, NewMessage};
use crate::errors::AppResult;
use crate::types::ApiResponse;

/// Contact form
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    #[schema(example = "Kamal")]
    pub first_name: Option<String>,
    #[schema(example = "Fernando")]
    pub last_name: Option<String>,
    #[schema(example = "kamal@example.com")]
    pub email: Option<String>,
    #[schema(example = "0712345678")]
    pub phone: Option<String>,
    #[schema(example = "Please call me back about visiting hours.", min_length = 10)]
    pub message: Option<String>,
}

pub fn public_routes() -> Router<AppState> {
    Router::new().route("/send", post(send_message))
}

pub fn admin_routes() -> Router<AppState> {
    Router::new().route("/getAllMessage", get(list_messages))
}

/// Submit the contact form
#[utoipa::path(
    post,
    path = "/api/v1/message/send",
    tag = "Messages",
    request_body = SendMessageRequest,
    responses(
        (status = 200, description = "Message stored"),
        (status = 400, description = "Missing or invalid field, or duplicate email")
    )
)]
pub async fn send_message(
    State(state): State<AppState>,
    Payload(payload): Payload<SendMessageRequest>,
) -> AppResult<Json<ApiResponse<()>>> {
    let message = NewMessage {
        first_name: required(payload.first_name)?,
        last_name: required(payload.last_name)?,
        email: required(payload.email)?,
        phone: required(payload.phone)?,
        message: required(payload.message)?,
    };

    state.services.messages().send(message).await?;
    Ok(Json(ApiResponse::message("Message sent successfully.")))
}

/// List every contact message
#[utoipa::path(
    get,
    path = "/api/v1/message/getAllMessage",
    tag = "Messages",
    responses(
        (status = 200, description = "All messages", body = Vec<Message>)
    ),
    security(("admin_cookie" = []))
)]
pub async fn list_messages(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<Message>>>> {
    let messages = state.services.messages().list().await?;
    Ok(Json(ApiResponse::success(messages)))
}
