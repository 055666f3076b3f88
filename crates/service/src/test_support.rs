#![cfg(test)]
use chrono::Utc;
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use tokio::sync::{Mutex, MutexGuard, OnceCell};

// Ensure migrations run only once across the entire test process
static MIGRATED: OnceCell<()> = OnceCell::const_new();

// Sequential-ID allocation races with itself, so DB tests take this lock
static DB_LOCK: Mutex<()> = Mutex::const_new(());

pub async fn db_guard() -> MutexGuard<'static, ()> {
    DB_LOCK.lock().await
}

pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    MIGRATED
        .get_or_try_init(|| async {
            let db = models::db::connect().await?;
            migration::Migrator::up(&db, None).await?;
            drop(db);
            Ok::<_, anyhow::Error>(())
        })
        .await?;

    // Fresh connection for the current test's runtime
    let db = models::db::connect().await?;
    Ok(db)
}

/// Unique-enough UID for test rows that survive a failed cleanup.
pub fn unique_uid(prefix: &str) -> String {
    let nanos = Utc::now().timestamp_nanos_opt().unwrap_or_default();
    format!("{prefix}-{nanos}")
}
