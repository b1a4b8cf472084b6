//! Appointment database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{Appointment, DoctorName};
use crate::errors::AppError;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "appointments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub nic: String,
    pub dob: Date,
    pub gender: String,
    pub appointment_date: Date,
    pub department: String,
    pub doctor_first_name: String,
    pub doctor_last_name: String,
    pub doctor_id: Uuid,
    pub patient_id: Uuid,
    pub has_visited: bool,
    pub address: String,
    pub status: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::DoctorId",
        to = "super::user::Column::Id"
    )]
    Doctor,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::PatientId",
        to = "super::user::Column::Id"
    )]
    Patient,
}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Appointment {
    type Error = AppError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Appointment {
            id: model.id,
            first_name: model.first_name,
            last_name: model.last_name,
            email: model.email,
            phone: model.phone,
            nic: model.nic,
            dob: model.dob,
            gender: model.gender.parse().map_err(AppError::internal)?,
            appointment_date: model.appointment_date,
            department: model.department,
            doctor: DoctorName {
                first_name: model.doctor_first_name,
                last_name: model.doctor_last_name,
            },
            doctor_id: model.doctor_id,
            patient_id: model.patient_id,
            has_visited: model.has_visited,
            address: model.address,
            status: model.status.parse().map_err(AppError::internal)?,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
