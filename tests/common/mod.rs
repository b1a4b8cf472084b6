//! In-memory persistence and storage, and a router built over them.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use chrono::{NaiveDate, Utc};
use serde_json::{json, Value};
use tower::util::ServiceExt;
use uuid::Uuid;

use hospital_api::api::{create_router, AppState};
use hospital_api::domain::{
    Appointment, Avatar, Gender, Message, NewAppointment, NewMessage, NewUser, Password,
    Registration, User, UserRole,
};
use hospital_api::errors::{AppError, AppResult};
use hospital_api::infra::{
    AppointmentRepository, AvatarStorage, MessageRepository, UnitOfWork, UploadedFile,
    UserRepository,
};
use hospital_api::services::{ServiceContainer, Services};
use hospital_api::Config;

pub const SECRET: &str = "integration-test-secret-of-32-chars";

#[derive(Default)]
pub struct MemoryUsers(Mutex<Vec<User>>);

#[async_trait]
impl UserRepository for MemoryUsers {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.0.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self.0.lock().unwrap().iter().find(|u| u.email == email).cloned())
    }

    async fn find_doctor(
        &self,
        first_name: &str,
        last_name: &str,
        department: &str,
    ) -> AppResult<Option<User>> {
        Ok(self
            .0
            .lock()
            .unwrap()
            .iter()
            .find(|u| {
                u.role == UserRole::Doctor
                    && u.first_name == first_name
                    && u.last_name == last_name
                    && u.doctor_department.as_deref() == Some(department)
            })
            .cloned())
    }

    async fn list_by_role(&self, role: UserRole) -> AppResult<Vec<User>> {
        Ok(self
            .0
            .lock()
            .unwrap()
            .iter()
            .filter(|u| u.role == role)
            .cloned()
            .collect())
    }

    async fn create(&self, user: NewUser, password: Password) -> AppResult<User> {
        let mut users = self.0.lock().unwrap();
        if users.iter().any(|u| u.email == user.email) {
            return Err(AppError::Duplicate("email".into()));
        }

        let now = Utc::now();
        let created = User {
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
            created_at: now,
            updated_at: now,
        };
        users.push(created.clone());
        Ok(created)
    }
}

#[derive(Default)]
pub struct MemoryAppointments(Mutex<Vec<Appointment>>);

#[async_trait]
impl AppointmentRepository for MemoryAppointments {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Appointment>> {
        Ok(self.0.lock().unwrap().iter().find(|a| a.id == id).cloned())
    }

    async fn list(&self) -> AppResult<Vec<Appointment>> {
        Ok(self.0.lock().unwrap().clone())
    }

    async fn create(&self, new: NewAppointment) -> AppResult<Appointment> {
        let now = Utc::now();
        let appointment = Appointment {
            id: Uuid::new_v4(),
            first_name: new.first_name,
            last_name: new.last_name,
            email: new.email,
            phone: new.phone,
            nic: new.nic,
            dob: new.dob,
            gender: new.gender,
            appointment_date: new.appointment_date,
            department: new.department,
            doctor: new.doctor,
            doctor_id: new.doctor_id,
            patient_id: new.patient_id,
            has_visited: new.has_visited,
            address: new.address,
            status: new.status,
            created_at: now,
            updated_at: now,
        };
        self.0.lock().unwrap().push(appointment.clone());
        Ok(appointment)
    }

    async fn update(&self, appointment: Appointment) -> AppResult<Appointment> {
        let mut all = self.0.lock().unwrap();
        let slot = all
            .iter_mut()
            .find(|a| a.id == appointment.id)
            .ok_or_else(|| AppError::not_found("Appointment"))?;
        *slot = appointment.clone();
        Ok(appointment)
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let mut all = self.0.lock().unwrap();
        let before = all.len();
        all.retain(|a| a.id != id);
        Ok(all.len() != before)
    }
}

#[derive(Default)]
pub struct MemoryMessages(Mutex<Vec<Message>>);

#[async_trait]
impl MessageRepository for MemoryMessages {
    async fn create(&self, new: NewMessage) -> AppResult<Message> {
        let mut all = self.0.lock().unwrap();
        if all.iter().any(|m| m.email == new.email) {
            return Err(AppError::Duplicate("email".into()));
        }

        let message = Message {
            id: Uuid::new_v4(),
            first_name: new.first_name,
            last_name: new.last_name,
            email: new.email,
            phone: new.phone,
            message: new.message,
            created_at: Utc::now(),
        };
        all.push(message.clone());
        Ok(message)
    }

    async fn list(&self) -> AppResult<Vec<Message>> {
        Ok(self.0.lock().unwrap().clone())
    }
}

#[derive(Default)]
pub struct MemoryPersistence {
    pub users: Arc<MemoryUsers>,
    pub appointments: Arc<MemoryAppointments>,
    pub messages: Arc<MemoryMessages>,
}

impl UnitOfWork for MemoryPersistence {
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

/// Records uploads instead of writing them anywhere.
#[derive(Default)]
pub struct MemoryStorage {
    pub uploads: Mutex<Vec<UploadedFile>>,
    pub removed: Mutex<Vec<String>>,
}

#[async_trait]
impl AvatarStorage for MemoryStorage {
    async fn upload(&self, file: UploadedFile) -> AppResult<Avatar> {
        let public_id = format!("{}.{}", Uuid::new_v4(), file.extension());
        self.uploads.lock().unwrap().push(file);
        Ok(Avatar {
            url: format!("http://localhost:4000/uploads/{}", public_id),
            public_id,
        })
    }

    async fn remove(&self, public_id: &str) -> AppResult<()> {
        self.removed.lock().unwrap().push(public_id.to_string());
        Ok(())
    }
}

/// Router plus handles on its backing stores.
pub struct TestApp {
    pub router: Router,
    pub services: Arc<Services>,
    pub persistence: Arc<MemoryPersistence>,
    pub storage: Arc<MemoryStorage>,
}

impl TestApp {
    pub fn new() -> Self {
        let config = Config::with_secret(SECRET);
        let persistence = Arc::new(MemoryPersistence::default());
        let storage = Arc::new(MemoryStorage::default());
        let services = Arc::new(Services::with_persistence(
            persistence.clone(),
            &config,
            storage.clone(),
        ));

        let router = create_router(AppState::new(services.clone(), config));

        Self {
            router,
            services,
            persistence,
            storage,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Vec<String>, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let cookies = response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .map(|v| v.to_str().unwrap().to_string())
            .collect();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, cookies, body)
    }

    /// Create an account directly, skipping the HTTP layer.
    pub async fn seed_user(&self, role: UserRole, email: &str) -> User {
        let registration = registration(email);
        match role {
            UserRole::Patient => {
                self.services
                    .auth()
                    .register_patient(registration)
                    .await
                    .unwrap()
                    .user
            }
            UserRole::Admin => self.services.auth().add_admin(registration).await.unwrap(),
            UserRole::Doctor => self
                .services
                .auth()
                .add_doctor(
                    registration,
                    "Cardiology".into(),
                    UploadedFile {
                        file_name: Some("doc.png".into()),
                        content_type: "image/png".into(),
                        bytes: axum::body::Bytes::from_static(b"png"),
                    },
                )
                .await
                .unwrap(),
        }
    }

    /// Log in through the API and return the `name=value` cookie pair.
    pub async fn login_cookie(&self, email: &str) -> String {
        let (status, cookies, _) = self
            .send(json_request(
                "POST",
                "/api/v1/user/login",
                None,
                json!({ "email": email, "password": PASSWORD }),
            ))
            .await;
        assert_eq!(status, StatusCode::OK);
        cookie_pair(&cookies[0])
    }
}

pub const PASSWORD: &str = "SecurePass123";

pub fn registration(email: &str) -> Registration {
    Registration {
        first_name: "Jane".into(),
        last_name: "Perera".into(),
        email: email.into(),
        phone: "0771234567".into(),
        nic: "1234567890123".into(),
        dob: NaiveDate::from_ymd_opt(1990, 5, 17).unwrap(),
        gender: Gender::Female,
        password: PASSWORD.into(),
    }
}

pub fn registration_json(email: &str) -> Value {
    json!({
        "firstName": "Jane",
        "lastName": "Perera",
        "email": email,
        "phone": "0771234567",
        "nic": "1234567890123",
        "dob": "1990-05-17",
        "gender": "Female",
        "password": PASSWORD,
        "role": "Patient"
    })
}

/// `name=value` part of a Set-Cookie header.
pub fn cookie_pair(set_cookie: &str) -> String {
    set_cookie.split(';').next().unwrap_or_default().to_string()
}

pub fn json_request(method: &str, uri: &str, cookie: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn get_request(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}
