//! User service - read side of the user directory.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{User, UserRole};
use crate::errors::AppResult;
use crate::infra::UnitOfWork;

#[async_trait]
pub trait UserService: Send + Sync {
    /// Every Doctor account, unpaginated
    async fn list_doctors(&self) -> AppResult<Vec<User>>;
}

/// Concrete implementation of UserService using Unit of Work.
pub struct UserManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> UserManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> UserService for UserManager<U> {
    async fn list_doctors(&self) -> AppResult<Vec<User>> {
        self.uow.users().list_by_role(UserRole::Doctor).await
    }
}
