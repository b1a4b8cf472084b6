//! Service Container - Centralized service access.
//!
//! Handlers reach every use case through [`ServiceContainer`], so the
//! router can be exercised against any persistence or storage backend.

use std::sync::Arc;

use super::{
    AppointmentManager, AppointmentService, AuthService, Authenticator, MessageManager,
    MessageService, TokenService, UserManager, UserService,
};
use crate::config::Config;
use crate::infra::{AvatarStorage, Persistence, UnitOfWork};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service container trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    fn auth(&self) -> Arc<dyn AuthService>;

    fn users(&self) -> Arc<dyn UserService>;

    fn appointments(&self) -> Arc<dyn AppointmentService>;

    fn messages(&self) -> Arc<dyn MessageService>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    user_service: Arc<dyn UserService>,
    appointment_service: Arc<dyn AppointmentService>,
    message_service: Arc<dyn MessageService>,
}

impl Services {
    /// Wire every service over the given persistence and avatar storage.
    pub fn with_persistence<U: UnitOfWork + 'static>(
        uow: Arc<U>,
        config: &Config,
        storage: Arc<dyn AvatarStorage>,
    ) -> Self {
        Self {
            auth_service: Arc::new(Authenticator::new(
                uow.clone(),
                TokenService::new(config),
                storage,
            )),
            user_service: Arc::new(UserManager::new(uow.clone())),
            appointment_service: Arc::new(AppointmentManager::new(uow.clone())),
            message_service: Arc::new(MessageManager::new(uow)),
        }
    }

    /// Create service container from database connection and config
    pub fn from_connection(
        db: sea_orm::DatabaseConnection,
        config: &Config,
        storage: Arc<dyn AvatarStorage>,
    ) -> Self {
        Self::with_persistence(Arc::new(Persistence::new(db)), config, storage)
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }

    fn appointments(&self) -> Arc<dyn AppointmentService> {
        self.appointment_service.clone()
    }

    fn messages(&self) -> Arc<dyn MessageService> {
        self.message_service.clone()
    }
}
