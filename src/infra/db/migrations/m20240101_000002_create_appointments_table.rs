//! Migration: Create appointments table.

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_users_table::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Appointments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Appointments::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Appointments::FirstName).string().not_null())
                    .col(ColumnDef::new(Appointments::LastName).string().not_null())
                    .col(ColumnDef::new(Appointments::Email).string().not_null())
                    .col(ColumnDef::new(Appointments::Phone).string_len(15).not_null())
                    .col(ColumnDef::new(Appointments::Nic).string().not_null())
                    .col(ColumnDef::new(Appointments::Dob).date().not_null())
                    .col(ColumnDef::new(Appointments::Gender).string_len(16).not_null())
                    .col(ColumnDef::new(Appointments::AppointmentDate).date().not_null())
                    .col(ColumnDef::new(Appointments::Department).string().not_null())
                    .col(ColumnDef::new(Appointments::DoctorFirstName).string().not_null())
                    .col(ColumnDef::new(Appointments::DoctorLastName).string().not_null())
                    .col(ColumnDef::new(Appointments::DoctorId).uuid().not_null())
                    .col(ColumnDef::new(Appointments::PatientId).uuid().not_null())
                    .col(
                        ColumnDef::new(Appointments::HasVisited)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Appointments::Address).string().not_null())
                    .col(
                        ColumnDef::new(Appointments::Status)
                            .string_len(16)
                            .not_null()
                            .default("Pending"),
                    )
                    .col(
                        ColumnDef::new(Appointments::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Appointments::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_appointments_doctor")
                            .from(Appointments::Table, Appointments::DoctorId)
                            .to(Users::Table, Users::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_appointments_patient")
                            .from(Appointments::Table, Appointments::PatientId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Appointments::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Appointments {
    Table,
    Id,
    FirstName,
    LastName,
    Email,
    Phone,
    Nic,
    Dob,
    Gender,
    AppointmentDate,
    Department,
    DoctorFirstName,
    DoctorLastName,
    DoctorId,
    PatientId,
    HasVisited,
    Address,
    Status,
    CreatedAt,
    UpdatedAt,
}
