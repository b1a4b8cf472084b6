//! Shared fixtures for service tests.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::domain::{Gender, NewUser, Password, Registration, User, UserRole};
use crate::infra::{
    AppointmentRepository, MessageRepository, MockAppointmentRepository, MockMessageRepository,
    MockUserRepository, UnitOfWork, UserRepository,
};

/// UnitOfWork over mocked repositories.
pub struct TestUnitOfWork {
    users: Arc<MockUserRepository>,
    appointments: Arc<MockAppointmentRepository>,
    messages: Arc<MockMessageRepository>,
}

impl Default for TestUnitOfWork {
    fn default() -> Self {
        Self::new(
            MockUserRepository::new(),
            MockAppointmentRepository::new(),
            MockMessageRepository::new(),
        )
    }
}

impl TestUnitOfWork {
    pub fn new(
        users: MockUserRepository,
        appointments: MockAppointmentRepository,
        messages: MockMessageRepository,
    ) -> Self {
        Self {
            users: Arc::new(users),
            appointments: Arc::new(appointments),
            messages: Arc::new(messages),
        }
    }

    pub fn with_users(users: MockUserRepository) -> Self {
        Self::new(users, MockAppointmentRepository::new(), MockMessageRepository::new())
    }
}

impl UnitOfWork for TestUnitOfWork {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }

    fn appointments(&self) -> Arc<dyn AppointmentRepository> {
        self.appointments.clone()
    }

    fn messages(&self) -> Arc<dyn MessageRepository> {
        self.messages.clone()
    }
}

pub fn registration() -> Registration {
    Registration {
        first_name: "Jane".into(),
        last_name: "Perera".into(),
        email: "jane@example.com".into(),
        phone: "0771234567".into(),
        nic: "1234567890123".into(),
        dob: NaiveDate::from_ymd_opt(1990, 5, 17).unwrap(),
        gender: Gender::Female,
        password: "SecurePass123".into(),
    }
}

/// What the repository would hand back after inserting `user`.
pub fn user_from(user: NewUser, password: Password) -> User {
    User {
        id: Uuid::new_v4(),
        first_name: user.first_name,
        last_name: user.last_name,
        email: user.email,
        phone: user.phone,
        nic: user.nic,
        dob: user.dob,
        gender: user.gender,
        password_hash: password.into_string(),
        role: user.role,
        doctor_department: user.doctor_department,
        doc_avatar: user.doc_avatar,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

/// A stored user with the given role and plain text password.
pub fn stored_user(role: UserRole, password: &str) -> User {
    let mut reg = registration();
    reg.password = password.to_string();
    let new_user = match role {
        UserRole::Doctor => NewUser::doctor(reg, "Cardiology".into()),
        other => NewUser::from_registration(reg, other),
    };
    let hash = Password::new(password).unwrap();
    user_from(new_user, hash)
}
