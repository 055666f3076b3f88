//! Create `bookmark` join table with composite PK (user_uid, opportunity_id).
//!
//! The composite key enforces at most one bookmark per (user, opportunity).
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Bookmark::Table)
                    .if_not_exists()
                    .col(string_len(Bookmark::UserUid, 128).not_null())
                    .col(string_len(Bookmark::OpportunityId, 16).not_null())
                    .col(timestamp_with_time_zone(Bookmark::SavedAt).not_null())
                    .primary_key(
                        Index::create()
                            .name("pk_bookmark")
                            .col(Bookmark::UserUid)
                            .col(Bookmark::OpportunityId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bookmark_user")
                            .from(Bookmark::Table, Bookmark::UserUid)
                            .to(User::Table, User::Uid)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bookmark_opportunity")
                            .from(Bookmark::Table, Bookmark::OpportunityId)
                            .to(Opportunity::Table, Opportunity::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Bookmark::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Bookmark { Table, UserUid, OpportunityId, SavedAt }

#[derive(DeriveIden)]
enum User { Table, Uid }

#[derive(DeriveIden)]
enum Opportunity { Table, Id }
