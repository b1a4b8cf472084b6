//! Unit of Work - single access point to every repository.
//!
//! Services reach storage only through [`UnitOfWork`], so a test can swap
//! the whole persistence layer for in-memory fakes. Every write in this
//! service is a single-row statement, so no transaction scope is exposed.

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use super::repositories::{
    AppointmentRepository, AppointmentStore, MessageRepository, MessageStore, UserRepository,
    UserStore,
};

/// Unit of Work trait for dependency injection.
pub trait UnitOfWork: Send + Sync {
    /// Get user repository
    fn users(&self) -> Arc<dyn UserRepository>;

    /// Get appointment repository
    fn appointments(&self) -> Arc<dyn AppointmentRepository>;

    /// Get message repository
    fn messages(&self) -> Arc<dyn MessageRepository>;
}

/// Concrete implementation of UnitOfWork over one connection pool
pub struct Persistence {
    user_repo: Arc<UserStore>,
    appointment_repo: Arc<AppointmentStore>,
    message_repo: Arc<MessageStore>,
}

impl Persistence {
    /// Create new UnitOfWork instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            user_repo: Arc::new(UserStore::new(db.clone())),
            appointment_repo: Arc::new(AppointmentStore::new(db.clone())),
            message_repo: Arc::new(MessageStore::new(db)),
        }
    }
}

impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn appointments(&self) -> Arc<dyn AppointmentRepository> {
        self.appointment_repo.clone()
    }

    fn messages(&self) -> Arc<dyn MessageRepository> {
        self.message_repo.clone()
    }
}
