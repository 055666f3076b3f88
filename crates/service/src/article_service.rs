use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};

use crate::errors::ServiceError;
use crate::ids;
use models::article::{self, Entity as ArticleEntity};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewArticle {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

async fn last_id(db: &DatabaseConnection) -> Result<Option<String>, ServiceError> {
    let last = ArticleEntity::find()
        .order_by_desc(article::Column::Id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(last.map(|a| a.id))
}

pub async fn create_article(
    db: &DatabaseConnection,
    input: NewArticle,
) -> Result<article::Model, ServiceError> {
    let last = last_id(db).await?;
    let id = ids::next_id(ids::ARTICLE_PREFIX, last.as_deref());
    let created = article::create(
        db,
        &id,
        &input.title,
        &input.content,
        input.category,
        input.image_url,
    )
    .await?;
    Ok(created)
}

/// Bulk insert; returns the number of inserted rows.
pub async fn bulk_create(
    db: &DatabaseConnection,
    inputs: Vec<NewArticle>,
) -> Result<usize, ServiceError> {
    if inputs.is_empty() {
        return Ok(0);
    }

    let mut last = last_id(db).await?;
    let mut records = Vec::with_capacity(inputs.len());
    for input in inputs {
        article::validate_title(&input.title)?;
        article::validate_content(&input.content)?;
        let id = ids::next_id(ids::ARTICLE_PREFIX, last.as_deref());
        records.push(article::ActiveModel {
            id: Set(id.clone()),
            title: Set(input.title),
            content: Set(input.content),
            category: Set(input.category),
            image_url: Set(input.image_url),
            created_at: Set(Utc::now().into()),
        });
        last = Some(id);
    }

    let count = records.len();
    ArticleEntity::insert_many(records)
        .exec(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(count)
}

pub async fn list_articles(db: &DatabaseConnection) -> Result<Vec<article::Model>, ServiceError> {
    ArticleEntity::find()
        .order_by_desc(article::Column::CreatedAt)
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}

pub async fn get_article(db: &DatabaseConnection, id: &str) -> Result<Option<article::Model>, ServiceError> {
    ArticleEntity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}

/// Full update of the writable fields; returns false when no row matches.
pub async fn update_article(
    db: &DatabaseConnection,
    id: &str,
    input: NewArticle,
) -> Result<bool, ServiceError> {
    let current = ArticleEntity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    let Some(existing) = current else { return Ok(false) };

    article::validate_title(&input.title)?;
    article::validate_content(&input.content)?;

    let mut am: article::ActiveModel = existing.into();
    am.title = Set(input.title);
    am.content = Set(input.content);
    am.category = Set(input.category);
    am.image_url = Set(input.image_url);
    am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(true)
}

pub async fn delete_article(db: &DatabaseConnection, id: &str) -> Result<bool, ServiceError> {
    let res = ArticleEntity::delete_by_id(id)
        .exec(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(res.rows_affected > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;

    fn sample(title: &str) -> NewArticle {
        NewArticle {
            title: title.into(),
            content: "How to prepare a scholarship essay...".into(),
            category: Some("study-skills".into()),
            image_url: None,
        }
    }

    #[tokio::test]
    async fn article_crud_and_bulk() -> Result<(), anyhow::Error> {
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

        let created = create_article(&db, sample("Essay checklist")).await?;
        assert!(created.id.starts_with(ids::ARTICLE_PREFIX));

        let found = get_article(&db, &created.id).await?.expect("created article");
        assert_eq!(found.category.as_deref(), Some("study-skills"));

        let total = bulk_create(&db, vec![sample("Bulk 1"), sample("Bulk 2")]).await?;
        assert_eq!(total, 2);

        let updated = update_article(&db, &created.id, sample("Essay checklist v2")).await?;
        assert!(updated);
        let found = get_article(&db, &created.id).await?.expect("updated article");
        assert_eq!(found.title, "Essay checklist v2");

        let all = list_articles(&db).await?;
        for a in all.iter().filter(|a| a.title.starts_with("Bulk ") || a.id == created.id) {
            delete_article(&db, &a.id).await?;
        }
        assert!(!delete_article(&db, &created.id).await?);
        Ok(())
    }
}
