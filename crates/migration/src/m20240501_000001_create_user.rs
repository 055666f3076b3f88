//! Create `user` table.
//!
//! Primary key is the Firebase UID; the identity provider owns credentials,
//! this table only stores the application profile and role.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .if_not_exists()
                    .col(string_len(User::Uid, 128).primary_key())
                    .col(ColumnDef::new(User::Email).string_len(255).null())
                    .col(string_len(User::Username, 128).not_null())
                    .col(string_len(User::Role, 16).not_null())
                    .col(ColumnDef::new(User::School).string_len(255).null())
                    .col(ColumnDef::new(User::Avatar).string_len(512).null())
                    .col(timestamp_with_time_zone(User::CreatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(User::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum User { Table, Uid, Email, Username, Role, School, Avatar, CreatedAt }
