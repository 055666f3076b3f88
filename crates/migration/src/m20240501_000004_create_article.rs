//! Create `article` table.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Article::Table)
                    .if_not_exists()
                    .col(string_len(Article::Id, 16).primary_key())
                    .col(string_len(Article::Title, 255).not_null())
                    .col(text(Article::Content).not_null())
                    .col(ColumnDef::new(Article::Category).string_len(128).null())
                    .col(ColumnDef::new(Article::ImageUrl).string_len(512).null())
                    .col(timestamp_with_time_zone(Article::CreatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Article::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Article { Table, Id, Title, Content, Category, ImageUrl, CreatedAt }
