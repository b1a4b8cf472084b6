//! Appointment repository.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};
use uuid::Uuid;

use super::entities::appointment::{self, ActiveModel, Entity as AppointmentEntity};
use crate::domain::{Appointment, NewAppointment};
use crate::errors::{AppError, AppResult, OptionExt};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Appointment>>;

    /// List all appointments, oldest first
    async fn list(&self) -> AppResult<Vec<Appointment>>;

    async fn create(&self, appointment: NewAppointment) -> AppResult<Appointment>;

    /// Persist every mutable field of an existing appointment
    async fn update(&self, appointment: Appointment) -> AppResult<Appointment>;

    /// Delete by ID, returning whether a row was removed
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}

pub struct AppointmentStore {
    db: DatabaseConnection,
}

impl AppointmentStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AppointmentRepository for AppointmentStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Appointment>> {
        AppointmentEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(Appointment::try_from)
            .transpose()
    }

    async fn list(&self) -> AppResult<Vec<Appointment>> {
        AppointmentEntity::find()
            .order_by_asc(appointment::Column::CreatedAt)
            .all(&self.db)
            .await?
            .into_iter()
            .map(Appointment::try_from)
            .collect()
    }

    async fn create(&self, new: NewAppointment) -> AppResult<Appointment> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            first_name: Set(new.first_name),
            last_name: Set(new.last_name),
            email: Set(new.email),
            phone: Set(new.phone),
            nic: Set(new.nic),
            dob: Set(new.dob),
            gender: Set(new.gender.as_str().to_string()),
            appointment_date: Set(new.appointment_date),
            department: Set(new.department),
            doctor_first_name: Set(new.doctor.first_name),
            doctor_last_name: Set(new.doctor.last_name),
            doctor_id: Set(new.doctor_id),
            patient_id: Set(new.patient_id),
            has_visited: Set(new.has_visited),
            address: Set(new.address),
            status: Set(new.status.as_str().to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Appointment::try_from(model)
    }

    async fn update(&self, appointment: Appointment) -> AppResult<Appointment> {
        let existing = AppointmentEntity::find_by_id(appointment.id)
            .one(&self.db)
            .await?
            .ok_or_not_found("Appointment")?;

        let mut active: ActiveModel = existing.into();
        active.first_name = Set(appointment.first_name);
        active.last_name = Set(appointment.last_name);
        active.email = Set(appointment.email);
        active.phone = Set(appointment.phone);
        active.nic = Set(appointment.nic);
        active.dob = Set(appointment.dob);
        active.gender = Set(appointment.gender.as_str().to_string());
        active.appointment_date = Set(appointment.appointment_date);
        active.department = Set(appointment.department);
        active.has_visited = Set(appointment.has_visited);
        active.address = Set(appointment.address);
        active.status = Set(appointment.status.as_str().to_string());
        active.updated_at = Set(appointment.updated_at);

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Appointment::try_from(model)
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = AppointmentEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected > 0)
    }
}
