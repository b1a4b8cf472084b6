//! Authentication service - sessions, account provisioning and the
//! role checks behind the access guards.

use async_trait::async_trait;
use std::sync::Arc;

use super::credentials::CredentialStore;
use super::token_service::TokenService;
use crate::config::ALLOWED_AVATAR_MIME_TYPES;
use crate::domain::{NewUser, Registration, User, UserRole};
use crate::errors::{AppError, AppResult};
use crate::infra::{AvatarStorage, UnitOfWork, UploadedFile};

/// A freshly issued session: the user and the token naming them.
#[derive(Debug, Clone)]
pub struct Session {
    pub user: User,
    pub token: String,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Create a Patient account and open a session for it
    async fn register_patient(&self, registration: Registration) -> AppResult<Session>;

    /// Check credentials, and the role when one is supplied
    async fn login(
        &self,
        email: &str,
        password: &str,
        role: Option<UserRole>,
    ) -> AppResult<Session>;

    /// Provision another admin
    async fn add_admin(&self, registration: Registration) -> AppResult<User>;

    /// Provision a doctor, storing the avatar first
    async fn add_doctor(
        &self,
        registration: Registration,
        department: String,
        avatar: UploadedFile,
    ) -> AppResult<User>;

    /// Resolve a session token to its user and require the given role
    async fn authenticate(&self, token: &str, required: UserRole) -> AppResult<User>;
}

/// Concrete implementation of AuthService using Unit of Work.
pub struct Authenticator<U: UnitOfWork> {
    credentials: CredentialStore<U>,
    tokens: TokenService,
    storage: Arc<dyn AvatarStorage>,
}

impl<U: UnitOfWork> Authenticator<U> {
    pub fn new(uow: Arc<U>, tokens: TokenService, storage: Arc<dyn AvatarStorage>) -> Self {
        Self {
            credentials: CredentialStore::new(uow),
            tokens,
            storage,
        }
    }

    fn open_session(&self, user: User) -> AppResult<Session> {
        let token = self.tokens.issue(user.id)?;
        Ok(Session { user, token })
    }
}

#[async_trait]
impl<U: UnitOfWork> AuthService for Authenticator<U> {
    async fn register_patient(&self, registration: Registration) -> AppResult<Session> {
        if self
            .credentials
            .find_by_email(&registration.email)
            .await?
            .is_some()
        {
            return Err(AppError::AlreadyExists("User Already Registered".into()));
        }

        let user = self
            .credentials
            .create(NewUser::from_registration(registration, UserRole::Patient))
            .await?;
        self.open_session(user)
    }

    async fn login(
        &self,
        email: &str,
        password: &str,
        role: Option<UserRole>,
    ) -> AppResult<Session> {
        let user = self.credentials.find_by_email(email).await?;

        if !self.credentials.verify_password(user.as_ref(), password) {
            tracing::debug!(email = %email, "Rejected login");
            return Err(AppError::InvalidCredentials);
        }
        let user = user.ok_or(AppError::InvalidCredentials)?;

        if role.is_some_and(|r| r != user.role) {
            return Err(AppError::InvalidRole);
        }

        tracing::info!(user_id = %user.id, role = %user.role, "User logged in");
        self.open_session(user)
    }

    async fn add_admin(&self, registration: Registration) -> AppResult<User> {
        if let Some(existing) = self.credentials.find_by_email(&registration.email).await? {
            return Err(AppError::AlreadyExists(format!(
                "{} with this email already exists",
                existing.role
            )));
        }

        self.credentials
            .create(NewUser::from_registration(registration, UserRole::Admin))
            .await
    }

    async fn add_doctor(
        &self,
        registration: Registration,
        department: String,
        avatar: UploadedFile,
    ) -> AppResult<User> {
        if !ALLOWED_AVATAR_MIME_TYPES.contains(&avatar.content_type.as_str()) {
            return Err(AppError::bad_request("Invalid Doctor Avatar Format"));
        }

        if self
            .credentials
            .find_by_email(&registration.email)
            .await?
            .is_some()
        {
            return Err(AppError::AlreadyExists(
                "A user with this email already exists".into(),
            ));
        }

        // Reject bad fields before anything is uploaded.
        let mut doctor = NewUser::doctor(registration, department);
        validator::Validate::validate(&doctor)?;

        let stored = self.storage.upload(avatar).await?;
        let public_id = stored.public_id.clone();
        doctor.doc_avatar = Some(stored);

        match self.credentials.create(doctor).await {
            Ok(user) => Ok(user),
            Err(e) => {
                if let Err(cleanup) = self.storage.remove(&public_id).await {
                    tracing::warn!(public_id = %public_id, error = %cleanup, "Avatar left orphaned");
                }
                Err(e)
            }
        }
    }

    async fn authenticate(&self, token: &str, required: UserRole) -> AppResult<User> {
        let user_id = self.tokens.verify(token)?;
        let user = self
            .credentials
            .find_by_id(user_id)
            .await?
            .ok_or(AppError::Unauthenticated)?;

        match (required, user.role) {
            (UserRole::Admin, UserRole::Admin)
            | (UserRole::Patient, UserRole::Patient)
            | (UserRole::Doctor, UserRole::Doctor) => Ok(user),
            (_, actual) => Err(AppError::Forbidden(actual.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::domain::Avatar;
    use crate::infra::{MockAvatarStorage, MockUserRepository};
    use crate::services::test_support::{registration, stored_user, user_from, TestUnitOfWork};
    use axum::body::Bytes;
    use mockall::predicate::eq;

    const SECRET: &str = "auth-service-test-secret-32-chars!!";

    fn tokens() -> TokenService {
        TokenService::new(&Config::with_secret(SECRET))
    }

    fn service(users: MockUserRepository, storage: MockAvatarStorage) -> Authenticator<TestUnitOfWork> {
        Authenticator::new(
            Arc::new(TestUnitOfWork::with_users(users)),
            tokens(),
            Arc::new(storage),
        )
    }

    fn png() -> UploadedFile {
        UploadedFile {
            file_name: Some("doc.png".into()),
            content_type: "image/png".into(),
            bytes: Bytes::from_static(b"png"),
        }
    }

    #[tokio::test]
    async fn test_register_rejects_existing_email() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .returning(|_| Ok(Some(stored_user(UserRole::Patient, "SecurePass123"))));
        users.expect_create().never();

        let err = service(users, MockAvatarStorage::new())
            .register_patient(registration())
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "User Already Registered");
    }

    #[tokio::test]
    async fn test_register_issues_session() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_email().returning(|_| Ok(None));
        users
            .expect_create()
            .returning(|user, password| Ok(user_from(user, password)));

        let session = service(users, MockAvatarStorage::new())
            .register_patient(registration())
            .await
            .unwrap();

        assert_eq!(session.user.role, UserRole::Patient);
        assert_eq!(tokens().verify(&session.token).unwrap(), session.user.id);
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .returning(|_| Ok(Some(stored_user(UserRole::Patient, "SecurePass123"))));

        let err = service(users, MockAvatarStorage::new())
            .login("jane@example.com", "WrongPass123", None)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_login_unknown_email() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_email().returning(|_| Ok(None));

        let err = service(users, MockAvatarStorage::new())
            .login("ghost@example.com", "SecurePass123", None)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_login_role_mismatch() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .returning(|_| Ok(Some(stored_user(UserRole::Patient, "SecurePass123"))));

        let auth = service(users, MockAvatarStorage::new());

        let err = auth
            .login("jane@example.com", "SecurePass123", Some(UserRole::Admin))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidRole));

        let session = auth
            .login("jane@example.com", "SecurePass123", Some(UserRole::Patient))
            .await
            .unwrap();
        assert_eq!(session.user.role, UserRole::Patient);
    }

    #[tokio::test]
    async fn test_add_admin_names_existing_role() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .returning(|_| Ok(Some(stored_user(UserRole::Doctor, "SecurePass123"))));

        let err = service(users, MockAvatarStorage::new())
            .add_admin(registration())
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Doctor with this email already exists");
    }

    #[tokio::test]
    async fn test_add_doctor_rejects_bad_format_before_lookup() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_email().never();
        let mut storage = MockAvatarStorage::new();
        storage.expect_upload().never();

        let mut file = png();
        file.content_type = "application/pdf".into();

        let err = service(users, storage)
            .add_doctor(registration(), "Cardiology".into(), file)
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Invalid Doctor Avatar Format");
    }

    #[tokio::test]
    async fn test_add_doctor_invalid_fields_skip_upload() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_email().returning(|_| Ok(None));
        let mut storage = MockAvatarStorage::new();
        storage.expect_upload().never();

        let mut reg = registration();
        reg.phone = "12".into();

        let err = service(users, storage)
            .add_doctor(reg, "Cardiology".into(), png())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_add_doctor_stores_avatar() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_email().returning(|_| Ok(None));
        users
            .expect_create()
            .withf(|user, _| user.doc_avatar.is_some() && user.role == UserRole::Doctor)
            .returning(|user, password| Ok(user_from(user, password)));

        let mut storage = MockAvatarStorage::new();
        storage.expect_upload().times(1).returning(|_| {
            Ok(Avatar {
                public_id: "abc.png".into(),
                url: "http://localhost:4000/uploads/abc.png".into(),
            })
        });

        let doctor = service(users, storage)
            .add_doctor(registration(), "Cardiology".into(), png())
            .await
            .unwrap();

        assert_eq!(doctor.doctor_department.as_deref(), Some("Cardiology"));
        assert_eq!(doctor.doc_avatar.unwrap().public_id, "abc.png");
    }

    #[tokio::test]
    async fn test_add_doctor_removes_avatar_when_create_fails() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_email().returning(|_| Ok(None));
        users
            .expect_create()
            .returning(|_, _| Err(AppError::Duplicate("email".into())));

        let mut storage = MockAvatarStorage::new();
        storage.expect_upload().times(1).returning(|_| {
            Ok(Avatar {
                public_id: "abc.png".into(),
                url: "http://localhost:4000/uploads/abc.png".into(),
            })
        });
        storage
            .expect_remove()
            .withf(|public_id| public_id == "abc.png")
            .times(1)
            .returning(|_| Ok(()));

        let err = service(users, storage)
            .add_doctor(registration(), "Cardiology".into(), png())
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Duplicate email entered.");
    }

    #[tokio::test]
    async fn test_add_doctor_upload_failure() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_email().returning(|_| Ok(None));
        users.expect_create().never();

        let mut storage = MockAvatarStorage::new();
        storage
            .expect_upload()
            .returning(|_| Err(AppError::Upload("disk full".into())));

        let err = service(users, storage)
            .add_doctor(registration(), "Cardiology".into(), png())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Upload(_)));
    }

    #[tokio::test]
    async fn test_authenticate_checks_live_role() {
        let patient = stored_user(UserRole::Patient, "SecurePass123");
        let id = patient.id;

        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .with(eq(id))
            .returning(move |_| Ok(Some(patient.clone())));

        let auth = service(users, MockAvatarStorage::new());
        let token = tokens().issue(id).unwrap();

        let user = auth.authenticate(&token, UserRole::Patient).await.unwrap();
        assert_eq!(user.id, id);

        let err = auth.authenticate(&token, UserRole::Admin).await.unwrap_err();
        assert_eq!(err.to_string(), "Patient not authorized for this resource");
    }

    #[tokio::test]
    async fn test_authenticate_deleted_user() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_id().returning(|_| Ok(None));

        let token = tokens().issue(uuid::Uuid::new_v4()).unwrap();
        let err = service(users, MockAvatarStorage::new())
            .authenticate(&token, UserRole::Admin)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Unauthenticated));
    }
}
