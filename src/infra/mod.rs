//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connections, migrations and repositories
//! - Avatar file storage
//! - Unit of Work aggregating the repositories

pub mod db;
pub mod repositories;
pub mod storage;
pub mod unit_of_work;

pub use db::{Database, Migrator};
pub use repositories::{
    AppointmentRepository, AppointmentStore, MessageRepository, MessageStore, UserRepository,
    UserStore,
};
pub use storage::{AvatarStorage, DiskStorage, UploadedFile};
pub use unit_of_work::{Persistence, UnitOfWork};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{MockAppointmentRepository, MockMessageRepository, MockUserRepository};
#[cfg(any(test, feature = "test-utils"))]
pub use storage::MockAvatarStorage;
