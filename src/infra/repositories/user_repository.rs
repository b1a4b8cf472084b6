//! User repository - persistence of patient, doctor and admin accounts.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use crate::domain::{NewUser, Password, User, UserRole};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find user by email address
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Find a doctor by name within a department
    async fn find_doctor(
        &self,
        first_name: &str,
        last_name: &str,
        department: &str,
    ) -> AppResult<Option<User>>;

    /// List every user holding the given role
    async fn list_by_role(&self, role: UserRole) -> AppResult<Vec<User>>;

    /// Insert a validated user with an already hashed password
    async fn create(&self, user: NewUser, password: Password) -> AppResult<User>;
}

/// Concrete implementation of UserRepository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        UserEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(User::try_from)
            .transpose()
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await?
            .map(User::try_from)
            .transpose()
    }

    async fn find_doctor(
        &self,
        first_name: &str,
        last_name: &str,
        department: &str,
    ) -> AppResult<Option<User>> {
        UserEntity::find()
            .filter(user::Column::FirstName.eq(first_name))
            .filter(user::Column::LastName.eq(last_name))
            .filter(user::Column::Role.eq(UserRole::Doctor.as_str()))
            .filter(user::Column::DoctorDepartment.eq(department))
            .one(&self.db)
            .await?
            .map(User::try_from)
            .transpose()
    }

    async fn list_by_role(&self, role: UserRole) -> AppResult<Vec<User>> {
        UserEntity::find()
            .filter(user::Column::Role.eq(role.as_str()))
            .all(&self.db)
            .await?
            .into_iter()
            .map(User::try_from)
            .collect()
    }

    async fn create(&self, user: NewUser, password: Password) -> AppResult<User> {
        let now = chrono::Utc::now();
        let (avatar_public_id, avatar_url) = match user.doc_avatar {
            Some(avatar) => (Some(avatar.public_id), Some(avatar.url)),
            None => (None, None),
        };

        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            first_name: Set(user.first_name),
            last_name: Set(user.last_name),
            email: Set(user.email),
            phone: Set(user.phone),
            nic: Set(user.nic),
            dob: Set(user.dob),
            gender: Set(user.gender.as_str().to_string()),
            password_hash: Set(password.into_string()),
            role: Set(user.role.as_str().to_string()),
            doctor_department: Set(user.doctor_department),
            avatar_public_id: Set(avatar_public_id),
            avatar_url: Set(avatar_url),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        User::try_from(model)
    }
}
