//! Hospital API - backend for a hospital front desk.
//!
//! Patients register and book appointments with named doctors while
//! admins provision staff and manage the schedule. Sessions are JWTs
//! carried in cookies.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Core business entities and validated inputs
//! - **services**: Application use cases and business logic
//! - **infra**: Database, repositories and avatar storage
//! - **api**: HTTP handlers, guards, and routes
//! - **types**: Response envelopes
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//!
//! # Bootstrap the first admin
//! cargo run -- create-admin --first-name Ada --last-name Silva \
//!     --email ada@example.com --phone 0771234567 --nic 1234567890123 \
//!     --dob 1980-01-31 --gender Female --password 'SecurePass123'
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Password, User, UserRole};
pub use errors::{AppError, AppResult};
