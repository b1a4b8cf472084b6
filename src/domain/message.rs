//! Contact message domain entity.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::rules::{ALPHABETIC, NUMERIC};

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    #[serde(rename = "_id")]
    pub id: Uuid,
    #[schema(example = "Kamal")]
    pub first_name: String,
    #[schema(example = "Fernando")]
    pub last_name: String,
    #[schema(example = "kamal@example.com")]
    pub email: String,
    #[schema(example = "0712345678")]
    pub phone: String,
    #[schema(example = "Please call me back about visiting hours.")]
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// A contact-form submission awaiting persistence.
#[derive(Debug, Clone, Validate)]
pub struct NewMessage {
    #[validate(
        length(min = 2, max = 10, message = "First Name must contain between 2 and 10 characters"),
        regex(path = *ALPHABETIC, message = "First Name should contain only alphabetic characters")
    )]
    pub first_name: String,
    #[validate(
        length(min = 2, max = 10, message = "Last Name must contain between 2 and 10 characters"),
        regex(path = *ALPHABETIC, message = "Last Name should contain only alphabetic characters")
    )]
    pub last_name: String,
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
    #[validate(
        length(min = 9, max = 10, message = "Phone number must contain between 9 and 10 characters"),
        regex(path = *NUMERIC, message = "Phone number should contain only numeric characters")
    )]
    pub phone: String,
    #[validate(length(min = 10, message = "Message must contain at least 10 characters"))]
    pub message: String,
}
