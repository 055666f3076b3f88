//! Migrator registering entity-specific migrations in dependency order.
//! Bookmarks reference users and opportunities, so those tables come first;
//! indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20240501_000001_create_user;
mod m20240501_000002_create_mentor;
mod m20240501_000003_create_opportunity;
mod m20240501_000004_create_article;
mod m20240501_000005_create_bookmark;
mod m20240501_000006_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240501_000001_create_user::Migration),
            Box::new(m20240501_000002_create_mentor::Migration),
            Box::new(m20240501_000003_create_opportunity::Migration),
            Box::new(m20240501_000004_create_article::Migration),
            Box::new(m20240501_000005_create_bookmark::Migration),
            // Indexes should always be applied last
            Box::new(m20240501_000006_add_indexes::Migration),
        ]
    }
}
