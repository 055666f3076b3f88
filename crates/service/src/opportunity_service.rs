use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};

use crate::errors::ServiceError;
use crate::ids;
use models::opportunity::{self, Entity as OpportunityEntity};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewOpportunity {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub content_url: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    pub kind: String,
    #[serde(default)]
    pub deadline: Option<NaiveDate>,
}

async fn last_id(db: &DatabaseConnection) -> Result<Option<String>, ServiceError> {
    let last = OpportunityEntity::find()
        .order_by_desc(opportunity::Column::Id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(last.map(|o| o.id))
}

/// Create one opportunity; the `OPnnn` ID is allocated from the current max.
pub async fn create_opportunity(
    db: &DatabaseConnection,
    input: NewOpportunity,
) -> Result<opportunity::Model, ServiceError> {
    let last = last_id(db).await?;
    let id = ids::next_id(ids::OPPORTUNITY_PREFIX, last.as_deref());
    let created = opportunity::create(
        db,
        &id,
        &input.title,
        input.description,
        input.content_url,
        input.image_url,
        &input.kind,
        input.deadline,
    )
    .await?;
    Ok(created)
}

/// Bulk insert; IDs continue from the current maximum in input order.
pub async fn create_many(
    db: &DatabaseConnection,
    inputs: Vec<NewOpportunity>,
) -> Result<usize, ServiceError> {
    if inputs.is_empty() {
        return Ok(0);
    }

    let mut last = last_id(db).await?;
    let mut records = Vec::with_capacity(inputs.len());
    for input in inputs {
        opportunity::validate_title(&input.title)?;
        let kind = opportunity::validate_kind(&input.kind)?;
        let id = ids::next_id(ids::OPPORTUNITY_PREFIX, last.as_deref());
        records.push(opportunity::ActiveModel {
            id: Set(id.clone()),
            title: Set(input.title),
            description: Set(input.description),
            content_url: Set(input.content_url),
            image_url: Set(input.image_url),
            kind: Set(kind),
            deadline: Set(input.deadline),
            created_at: Set(Utc::now().into()),
        });
        last = Some(id);
    }

    let count = records.len();
    OpportunityEntity::insert_many(records)
        .exec(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(count)
}

pub async fn list_opportunities(
    db: &DatabaseConnection,
) -> Result<Vec<opportunity::Model>, ServiceError> {
    OpportunityEntity::find()
        .order_by_desc(opportunity::Column::CreatedAt)
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}

pub async fn get_opportunity(
    db: &DatabaseConnection,
    id: &str,
) -> Result<Option<opportunity::Model>, ServiceError> {
    OpportunityEntity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}

pub async fn list_by_kind(
    db: &DatabaseConnection,
    kind: &str,
) -> Result<Vec<opportunity::Model>, ServiceError> {
    OpportunityEntity::find()
        .filter(opportunity::Column::Kind.eq(kind.to_ascii_lowercase()))
        .order_by_desc(opportunity::Column::CreatedAt)
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}

/// Full update of the writable fields; returns false when no row matches.
pub async fn update_opportunity(
    db: &DatabaseConnection,
    id: &str,
    input: NewOpportunity,
) -> Result<bool, ServiceError> {
    let current = OpportunityEntity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    let Some(existing) = current else { return Ok(false) };

    opportunity::validate_title(&input.title)?;
    let kind = opportunity::validate_kind(&input.kind)?;

    let mut am: opportunity::ActiveModel = existing.into();
    am.title = Set(input.title);
    am.description = Set(input.description);
    am.content_url = Set(input.content_url);
    am.image_url = Set(input.image_url);
    am.kind = Set(kind);
    am.deadline = Set(input.deadline);
    am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(true)
}

pub async fn delete_opportunity(db: &DatabaseConnection, id: &str) -> Result<bool, ServiceError> {
    let res = OpportunityEntity::delete_by_id(id)
        .exec(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(res.rows_affected > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;

    fn sample(title: &str, kind: &str) -> NewOpportunity {
        NewOpportunity {
            title: title.into(),
            description: Some("desc".into()),
            content_url: None,
            image_url: None,
            kind: kind.into(),
            deadline: NaiveDate::from_ymd_opt(2026, 12, 31),
        }
    }

    #[tokio::test]
    async fn opportunity_crud() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() {
            return Ok(());
        }
        let db = match get_db().await {
            Ok(db) => db,
            Err(e) => {
                eprintln!("skip: db unavailable: {e}");
                return Ok(());
            }
        };
        let _guard = crate::test_support::db_guard().await;

        let created = create_opportunity(&db, sample("Govt Scholarship 2026", "Scholarship")).await?;
        assert!(created.id.starts_with(ids::OPPORTUNITY_PREFIX));
        // Kind is normalized on the way in
        assert_eq!(created.kind, "scholarship");

        let found = get_opportunity(&db, &created.id).await?.expect("created opportunity");
        assert_eq!(found.title, "Govt Scholarship 2026");

        let by_kind = list_by_kind(&db, "SCHOLARSHIP").await?;
        assert!(by_kind.iter().any(|o| o.id == created.id));

        let updated = update_opportunity(&db, &created.id, sample("Updated title", "event")).await?;
        assert!(updated);
        let found = get_opportunity(&db, &created.id).await?.expect("updated opportunity");
        assert_eq!(found.kind, "event");

        assert!(delete_opportunity(&db, &created.id).await?);
        assert!(!delete_opportunity(&db, &created.id).await?);
        assert!(!update_opportunity(&db, &created.id, sample("x", "event")).await?);
        Ok(())
    }

    #[tokio::test]
    async fn bulk_create_allocates_sequential_ids() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() {
            return Ok(());
        }
        let db = match get_db().await {
            Ok(db) => db,
            Err(e) => {
                eprintln!("skip: db unavailable: {e}");
                return Ok(());
            }
        };
        let _guard = crate::test_support::db_guard().await;

        assert_eq!(create_many(&db, vec![]).await?, 0);

        let count = create_many(
            &db,
            vec![sample("Bulk A", "contest"), sample("Bulk B", "event")],
        )
        .await?;
        assert_eq!(count, 2);

        let all = list_opportunities(&db).await?;
        let a = all.iter().find(|o| o.title == "Bulk A").expect("bulk a");
        let b = all.iter().find(|o| o.title == "Bulk B").expect("bulk b");
        let tail = |id: &str| id[ids::OPPORTUNITY_PREFIX.len()..].parse::<u64>().expect("numeric tail");
        assert_eq!(tail(&b.id), tail(&a.id) + 1, "ids continue in input order");

        delete_opportunity(&db, &a.id).await?;
        delete_opportunity(&db, &b.id).await?;
        Ok(())
    }

    #[tokio::test]
    async fn bulk_create_rejects_bad_kind_up_front() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() {
            return Ok(());
        }
        let db = match get_db().await {
            Ok(db) => db,
            Err(e) => {
                eprintln!("skip: db unavailable: {e}");
                return Ok(());
            }
        };
        let _guard = crate::test_support::db_guard().await;

        let before = list_opportunities(&db).await?.len();
        let res = create_many(&db, vec![sample("Ok", "event"), sample("Bad", "internship")]).await;
        assert!(matches!(res, Err(ServiceError::Model(_))));
        // Nothing inserted when validation fails
        assert_eq!(list_opportunities(&db).await?.len(), before);
        Ok(())
    }
}
