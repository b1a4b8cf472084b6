//! Migration: Create users table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Users::FirstName).string_len(10).not_null())
                    .col(ColumnDef::new(Users::LastName).string_len(10).not_null())
                    .col(ColumnDef::new(Users::Email).string().not_null().unique_key())
                    .col(ColumnDef::new(Users::Phone).string_len(15).not_null())
                    .col(ColumnDef::new(Users::Nic).string_len(13).not_null())
                    .col(ColumnDef::new(Users::Dob).date().not_null())
                    .col(ColumnDef::new(Users::Gender).string_len(16).not_null())
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Users::Role).string_len(16).not_null())
                    .col(ColumnDef::new(Users::DoctorDepartment).string().null())
                    .col(ColumnDef::new(Users::AvatarPublicId).string().null())
                    .col(ColumnDef::new(Users::AvatarUrl).string().null())
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Users::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Doctor lookups filter on role + department
        manager
            .create_index(
                Index::create()
                    .name("idx_users_role_department")
                    .table(Users::Table)
                    .col(Users::Role)
                    .col(Users::DoctorDepartment)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub(super) enum Users {
    Table,
    Id,
    FirstName,
    LastName,
    Email,
    Phone,
    Nic,
    Dob,
    Gender,
    PasswordHash,
    Role,
    DoctorDepartment,
    AvatarPublicId,
    AvatarUrl,
    CreatedAt,
    UpdatedAt,
}
