//! User database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{Avatar, User};
use crate::errors::AppError;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub phone: String,
    pub nic: String,
    pub dob: Date,
    pub gender: String,
    pub password_hash: String,
    pub role: String,
    pub doctor_department: Option<String>,
    pub avatar_public_id: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl TryFrom<Model> for User {
    type Error = AppError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let doc_avatar = match (model.avatar_public_id, model.avatar_url) {
            (Some(public_id), Some(url)) => Some(Avatar { public_id, url }),
            _ => None,
        };

        Ok(User {
            id: model.id,
            first_name: model.first_name,
            last_name: model.last_name,
            email: model.email,
            phone: model.phone,
            nic: model.nic,
            dob: model.dob,
            gender: model.gender.parse().map_err(AppError::internal)?,
            password_hash: model.password_hash,
            role: model.role.parse().map_err(AppError::internal)?,
            doctor_department: model.doctor_department,
            doc_avatar,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
