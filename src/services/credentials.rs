//! Credential store - the one path by which accounts are created.
//!
//! Every account (patient registration, admin and doctor provisioning,
//! the `create-admin` command) goes through [`CredentialStore::create`],
//! which validates, hashes the password once, then inserts.

use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::domain::{NewUser, Password, User};
use crate::errors::AppResult;
use crate::infra::UnitOfWork;

// Verified against when the email is unknown so both branches cost a hash.
const DUMMY_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHRzb21lc2FsdA$2lJ4dZ0bN9hWqV9E3bm0sQ4m1n8b3vYpTtVq7j7m0cA";

pub struct CredentialStore<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> Clone for CredentialStore<U> {
    fn clone(&self) -> Self {
        Self {
            uow: self.uow.clone(),
        }
    }
}

impl<U: UnitOfWork> CredentialStore<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    /// Validate, hash, persist.
    pub async fn create(&self, user: NewUser) -> AppResult<User> {
        user.validate()?;
        let password = Password::new(&user.password)?;

        let created = self.uow.users().create(user, password).await?;
        tracing::info!(user_id = %created.id, role = %created.role, "Account created");
        Ok(created)
    }

    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        self.uow.users().find_by_email(email).await
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        self.uow.users().find_by_id(id).await
    }

    /// Check a candidate password against the stored hash.
    pub fn verify_password(&self, user: Option<&User>, candidate: &str) -> bool {
        let hash = user.map_or(DUMMY_HASH, |u| u.password_hash.as_str());
        let matches = Password::from_hash(hash.to_string()).verify(candidate);
        user.is_some() && matches
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserRole;
    use crate::errors::AppError;
    use crate::infra::MockUserRepository;
    use crate::services::test_support::{registration, user_from, TestUnitOfWork};

    #[tokio::test]
    async fn test_create_hashes_once_before_insert() {
        let mut users = MockUserRepository::new();
        users
            .expect_create()
            .times(1)
            .withf(|user, password| {
                password.as_str().starts_with("$argon2") && password.verify(&user.password)
            })
            .returning(|user, password| Ok(user_from(user, password)));

        let store = CredentialStore::new(Arc::new(TestUnitOfWork::with_users(users)));
        let created = store
            .create(NewUser::from_registration(registration(), UserRole::Patient))
            .await
            .unwrap();

        assert_ne!(created.password_hash, "SecurePass123");
        assert!(store.verify_password(Some(&created), "SecurePass123"));
        assert!(!store.verify_password(Some(&created), "WrongPass123"));
    }

    #[tokio::test]
    async fn test_invalid_user_never_reaches_repository() {
        let mut users = MockUserRepository::new();
        users.expect_create().never();

        let mut reg = registration();
        reg.nic = "123".into();

        let store = CredentialStore::new(Arc::new(TestUnitOfWork::with_users(users)));
        let err = store
            .create(NewUser::from_registration(reg, UserRole::Patient))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_unknown_user_never_verifies() {
        let store = CredentialStore::new(Arc::new(TestUnitOfWork::default()));
        assert!(!store.verify_password(None, "anything"));
    }
}
