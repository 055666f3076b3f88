//! Create `mentor` table with prefixed string primary key (`MT001`, ...).
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Mentor::Table)
                    .if_not_exists()
                    .col(string_len(Mentor::Id, 16).primary_key())
                    .col(string_len(Mentor::FullName, 255).not_null())
                    .col(ColumnDef::new(Mentor::Position).string_len(255).null())
                    .col(ColumnDef::new(Mentor::Workplace).string_len(255).null())
                    .col(ColumnDef::new(Mentor::Specialty).string_len(255).null())
                    .col(ColumnDef::new(Mentor::ContactUrl).string_len(512).null())
                    .col(ColumnDef::new(Mentor::AvatarUrl).string_len(512).null())
                    .col(timestamp_with_time_zone(Mentor::CreatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Mentor::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Mentor { Table, Id, FullName, Position, Workplace, Specialty, ContactUrl, AvatarUrl, CreatedAt }
