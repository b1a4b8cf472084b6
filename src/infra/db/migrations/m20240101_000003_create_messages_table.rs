//! Migration: Create messages table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Messages::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Messages::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Messages::FirstName).string_len(10).not_null())
                    .col(ColumnDef::new(Messages::LastName).string_len(10).not_null())
                    .col(ColumnDef::new(Messages::Email).string().not_null().unique_key())
                    .col(ColumnDef::new(Messages::Phone).string_len(10).not_null())
                    .col(ColumnDef::new(Messages::Message).text().not_null())
                    .col(
                        ColumnDef::new(Messages::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Messages::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Messages {
    Table,
    Id,
    FirstName,
    LastName,
    Email,
    Phone,
    Message,
    CreatedAt,
}
