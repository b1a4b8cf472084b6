//! Appointment service - booking by patients, administration by admins.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::domain::{Appointment, AppointmentChanges, AppointmentRequest, NewAppointment};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

#[async_trait]
pub trait AppointmentService: Send + Sync {
    /// Book an appointment for `patient_id` with the named doctor
    async fn create(&self, request: AppointmentRequest, patient_id: Uuid) -> AppResult<Appointment>;

    async fn list(&self) -> AppResult<Vec<Appointment>>;

    /// Apply a partial update and return the stored record
    async fn update(&self, id: Uuid, changes: AppointmentChanges) -> AppResult<Appointment>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

pub struct AppointmentManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> AppointmentManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> AppointmentService for AppointmentManager<U> {
    async fn create(&self, request: AppointmentRequest, patient_id: Uuid) -> AppResult<Appointment> {
        let doctor = self
            .uow
            .users()
            .find_doctor(
                &request.doctor.first_name,
                &request.doctor.last_name,
                &request.department,
            )
            .await?
            .ok_or_else(|| AppError::NotFound("Doctor not found in the system.".into()))?;

        let appointment = NewAppointment::new(request, doctor.id, patient_id);
        appointment.validate()?;

        let created = self.uow.appointments().create(appointment).await?;
        tracing::info!(
            appointment_id = %created.id,
            doctor_id = %created.doctor_id,
            patient_id = %created.patient_id,
            "Appointment booked"
        );
        Ok(created)
    }

    async fn list(&self) -> AppResult<Vec<Appointment>> {
        self.uow.appointments().list().await
    }

    async fn update(&self, id: Uuid, changes: AppointmentChanges) -> AppResult<Appointment> {
        changes.validate()?;

        let mut appointment = self
            .uow
            .appointments()
            .find_by_id(id)
            .await?
            .ok_or_not_found("Appointment")?;

        changes.apply(&mut appointment);
        let updated = self.uow.appointments().update(appointment).await?;

        tracing::info!(appointment_id = %id, status = updated.status.as_str(), "Appointment updated");
        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        if !self.uow.appointments().delete(id).await? {
            return Err(AppError::not_found("Appointment"));
        }
        tracing::info!(appointment_id = %id, "Appointment deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AppointmentStatus, DoctorName, Gender, UserRole};
    use crate::infra::{MockAppointmentRepository, MockMessageRepository, MockUserRepository};
    use crate::services::test_support::{stored_user, TestUnitOfWork};
    use chrono::{NaiveDate, Utc};

    fn request() -> AppointmentRequest {
        AppointmentRequest {
            first_name: "Jane".into(),
            last_name: "Perera".into(),
            email: "jane@example.com".into(),
            phone: "0771234567".into(),
            nic: "1234567890123".into(),
            dob: NaiveDate::from_ymd_opt(1990, 5, 17).unwrap(),
            gender: Gender::Female,
            appointment_date: NaiveDate::from_ymd_opt(2030, 1, 10).unwrap(),
            department: "Cardiology".into(),
            doctor: DoctorName {
                first_name: "Jane".into(),
                last_name: "Perera".into(),
            },
            has_visited: false,
            address: "12 Galle Road".into(),
        }
    }

    fn stored(new: NewAppointment) -> Appointment {
        Appointment {
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
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn service(
        users: MockUserRepository,
        appointments: MockAppointmentRepository,
    ) -> AppointmentManager<TestUnitOfWork> {
        AppointmentManager::new(Arc::new(TestUnitOfWork::new(
            users,
            appointments,
            MockMessageRepository::new(),
        )))
    }

    #[tokio::test]
    async fn test_unknown_doctor() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_doctor()
            .withf(|first, last, dept| first == "Jane" && last == "Perera" && dept == "Cardiology")
            .returning(|_, _, _| Ok(None));
        let mut appointments = MockAppointmentRepository::new();
        appointments.expect_create().never();

        let err = service(users, appointments)
            .create(request(), Uuid::new_v4())
            .await
            .unwrap_err();

        assert_eq!(err.status(), axum::http::StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Doctor not found in the system.");
    }

    #[tokio::test]
    async fn test_create_binds_doctor_and_patient() {
        let doctor = stored_user(UserRole::Doctor, "SecurePass123");
        let doctor_id = doctor.id;
        let patient_id = Uuid::new_v4();

        let mut users = MockUserRepository::new();
        users
            .expect_find_doctor()
            .returning(move |_, _, _| Ok(Some(doctor.clone())));
        let mut appointments = MockAppointmentRepository::new();
        appointments
            .expect_create()
            .returning(|new| Ok(stored(new)));

        let created = service(users, appointments)
            .create(request(), patient_id)
            .await
            .unwrap();

        assert_eq!(created.doctor_id, doctor_id);
        assert_eq!(created.patient_id, patient_id);
        assert_eq!(created.status, AppointmentStatus::Pending);
    }

    #[tokio::test]
    async fn test_update_unknown_id() {
        let mut appointments = MockAppointmentRepository::new();
        appointments.expect_find_by_id().returning(|_| Ok(None));
        appointments.expect_update().never();

        let changes = AppointmentChanges {
            status: Some(AppointmentStatus::Accepted),
            ..Default::default()
        };
        let err = service(MockUserRepository::new(), appointments)
            .update(Uuid::new_v4(), changes)
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Appointment not found.");
    }

    #[tokio::test]
    async fn test_update_persists_status() {
        let existing = stored(NewAppointment::new(request(), Uuid::new_v4(), Uuid::new_v4()));
        let id = existing.id;

        let mut appointments = MockAppointmentRepository::new();
        appointments
            .expect_find_by_id()
            .returning(move |_| Ok(Some(existing.clone())));
        appointments
            .expect_update()
            .withf(|a| a.status == AppointmentStatus::Rejected)
            .returning(Ok);

        let changes = AppointmentChanges {
            status: Some(AppointmentStatus::Rejected),
            ..Default::default()
        };
        let updated = service(MockUserRepository::new(), appointments)
            .update(id, changes)
            .await
            .unwrap();

        assert_eq!(updated.id, id);
        assert_eq!(updated.status, AppointmentStatus::Rejected);
    }

    #[tokio::test]
    async fn test_delete_missing() {
        let mut appointments = MockAppointmentRepository::new();
        appointments.expect_delete().returning(|_| Ok(false));

        let err = service(MockUserRepository::new(), appointments)
            .delete(Uuid::new_v4())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
    }
}
