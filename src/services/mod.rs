//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion and reach storage through the Unit of Work.

mod appointment_service;
mod auth_service;
pub mod container;
mod credentials;
mod message_service;
mod token_service;
mod user_service;

#[cfg(test)]
pub(crate) mod test_support;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use appointment_service::{AppointmentManager, AppointmentService};
pub use auth_service::{AuthService, Authenticator, Session};
pub use credentials::CredentialStore;
pub use message_service::{MessageManager, MessageService};
pub use token_service::{Claims, TokenService};
pub use user_service::{UserManager, UserService};

#[cfg(any(test, feature = "test-utils"))]
pub use container::MockServiceContainer;
