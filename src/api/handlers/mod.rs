//! HTTP request handlers.

pub mod appointment_handler;
pub mod auth_handler;
mod fields;
pub mod message_handler;
pub mod user_handler;

pub use fields::RegistrationFields;
