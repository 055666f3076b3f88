use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};

use crate::errors::ServiceError;
use crate::ids;
use models::mentor::{self, Entity as MentorEntity};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMentor {
    pub full_name: String,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub workplace: Option<String>,
    #[serde(default)]
    pub specialty: Option<String>,
    #[serde(default)]
    pub contact_url: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateMentor {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub workplace: Option<String>,
    #[serde(default)]
    pub specialty: Option<String>,
    #[serde(default)]
    pub contact_url: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// Create a mentor; the `MTnnn` ID is allocated from the current maximum.
pub async fn create_mentor(
    db: &DatabaseConnection,
    input: NewMentor,
) -> Result<mentor::Model, ServiceError> {
    mentor::validate_full_name(&input.full_name)?;
    let last = MentorEntity::find()
        .order_by_desc(mentor::Column::Id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    let id = ids::next_id(ids::MENTOR_PREFIX, last.as_ref().map(|m| m.id.as_str()));

    let created = mentor::create(
        db,
        &id,
        &input.full_name,
        input.position,
        input.workplace,
        input.specialty,
        input.contact_url,
        input.avatar_url,
    )
    .await?;
    Ok(created)
}

pub async fn list_mentors(db: &DatabaseConnection) -> Result<Vec<mentor::Model>, ServiceError> {
    MentorEntity::find()
        .order_by_desc(mentor::Column::CreatedAt)
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}

pub async fn get_mentor(db: &DatabaseConnection, id: &str) -> Result<Option<mentor::Model>, ServiceError> {
    MentorEntity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}

/// Case-insensitive substring search over name, specialty and workplace.
pub async fn search_mentors(
    db: &DatabaseConnection,
    keyword: &str,
) -> Result<Vec<mentor::Model>, ServiceError> {
    let pat = format!("%{}%", keyword.to_lowercase());
    let cond = Condition::any()
        .add(Expr::expr(Func::lower(Expr::col((mentor::Entity, mentor::Column::FullName)))).like(pat.clone()))
        .add(Expr::expr(Func::lower(Expr::col((mentor::Entity, mentor::Column::Specialty)))).like(pat.clone()))
        .add(Expr::expr(Func::lower(Expr::col((mentor::Entity, mentor::Column::Workplace)))).like(pat));
    MentorEntity::find()
        .filter(cond)
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}

/// Partial update; returns false when the mentor does not exist.
pub async fn update_mentor(
    db: &DatabaseConnection,
    id: &str,
    changes: UpdateMentor,
) -> Result<bool, ServiceError> {
    let current = MentorEntity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    let Some(existing) = current else { return Ok(false) };

    let mut am: mentor::ActiveModel = existing.into();
    let mut changed = false;
    if let Some(full_name) = changes.full_name {
        mentor::validate_full_name(&full_name)?;
        am.full_name = Set(full_name);
        changed = true;
    }
    if let Some(position) = changes.position {
        am.position = Set(Some(position));
        changed = true;
    }
    if let Some(workplace) = changes.workplace {
        am.workplace = Set(Some(workplace));
        changed = true;
    }
    if let Some(specialty) = changes.specialty {
        am.specialty = Set(Some(specialty));
        changed = true;
    }
    if let Some(contact_url) = changes.contact_url {
        am.contact_url = Set(Some(contact_url));
        changed = true;
    }
    if let Some(avatar_url) = changes.avatar_url {
        am.avatar_url = Set(Some(avatar_url));
        changed = true;
    }
    if !changed {
        return Ok(false);
    }
    am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(true)
}

pub async fn delete_mentor(db: &DatabaseConnection, id: &str) -> Result<bool, ServiceError> {
    let res = MentorEntity::delete_by_id(id)
        .exec(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(res.rows_affected > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;

    #[tokio::test]
    async fn mentor_crud_and_search() -> Result<(), anyhow::Error> {
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

        let created = create_mentor(
            &db,
            NewMentor {
                full_name: "Tran Quang Huy".into(),
                position: Some("Senior Engineer".into()),
                workplace: Some("FPT Software".into()),
                specialty: Some("Distributed Systems".into()),
                contact_url: None,
                avatar_url: None,
            },
        )
        .await?;
        assert!(created.id.starts_with(ids::MENTOR_PREFIX));

        let found = get_mentor(&db, &created.id).await?.expect("created mentor");
        assert_eq!(found.full_name, "Tran Quang Huy");

        // Search is case-insensitive and matches any of the three fields
        let hits = search_mentors(&db, "distributed").await?;
        assert!(hits.iter().any(|m| m.id == created.id));
        let hits = search_mentors(&db, "FPT").await?;
        assert!(hits.iter().any(|m| m.id == created.id));

        let changed = update_mentor(
            &db,
            &created.id,
            UpdateMentor { position: Some("Principal Engineer".into()), ..UpdateMentor::default() },
        )
        .await?;
        assert!(changed);
        let found = get_mentor(&db, &created.id).await?.expect("updated mentor");
        assert_eq!(found.position.as_deref(), Some("Principal Engineer"));

        assert!(delete_mentor(&db, &created.id).await?);
        assert!(!delete_mentor(&db, &created.id).await?);
        assert!(!update_mentor(&db, &created.id, UpdateMentor::default()).await?);
        Ok(())
    }
}
