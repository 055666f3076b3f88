//! Create `opportunity` table (scholarships, contests, events).
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Opportunity::Table)
                    .if_not_exists()
                    .col(string_len(Opportunity::Id, 16).primary_key())
                    .col(string_len(Opportunity::Title, 255).not_null())
                    .col(ColumnDef::new(Opportunity::Description).text().null())
                    .col(ColumnDef::new(Opportunity::ContentUrl).string_len(512).null())
                    .col(ColumnDef::new(Opportunity::ImageUrl).string_len(512).null())
                    .col(string_len(Opportunity::Kind, 32).not_null())
                    .col(ColumnDef::new(Opportunity::Deadline).date().null())
                    .col(timestamp_with_time_zone(Opportunity::CreatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Opportunity::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Opportunity { Table, Id, Title, Description, ContentUrl, ImageUrl, Kind, Deadline, CreatedAt }
