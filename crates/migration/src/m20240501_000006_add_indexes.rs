use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Users: role listings
        manager
            .create_index(
                Index::create()
                    .name("idx_user_role")
                    .table(User::Table)
                    .col(User::Role)
                    .to_owned(),
            )
            .await?;

        // Opportunities: kind filter and newest-first listings
        manager
            .create_index(
                Index::create()
                    .name("idx_opportunity_kind")
                    .table(Opportunity::Table)
                    .col(Opportunity::Kind)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_opportunity_created")
                    .table(Opportunity::Table)
                    .col(Opportunity::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // Articles: newest-first listings
        manager
            .create_index(
                Index::create()
                    .name("idx_article_created")
                    .table(Article::Table)
                    .col(Article::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // Bookmarks: per-user listing
        manager
            .create_index(
                Index::create()
                    .name("idx_bookmark_user")
                    .table(Bookmark::Table)
                    .col(Bookmark::UserUid)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_user_role").table(User::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_opportunity_kind").table(Opportunity::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_opportunity_created").table(Opportunity::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_article_created").table(Article::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_bookmark_user").table(Bookmark::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum User { Table, Role }

#[derive(DeriveIden)]
enum Opportunity { Table, Kind, CreatedAt }

#[derive(DeriveIden)]
enum Article { Table, CreatedAt }

#[derive(DeriveIden)]
enum Bookmark { Table, UserUid }
