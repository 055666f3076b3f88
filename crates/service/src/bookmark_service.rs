use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde::Serialize;

use crate::errors::ServiceError;
use models::{
    bookmark::{self, Entity as BookmarkEntity},
    opportunity::{self, Entity as OpportunityEntity},
    user::Entity as UserEntity,
};

/// Outcome of an add attempt; the handler maps each case to its own status.
#[derive(Debug, PartialEq, Eq)]
pub enum BookmarkAdd {
    Added,
    UnknownUser,
    UnknownOpportunity,
    AlreadyBookmarked,
}

/// A bookmarked opportunity as returned to the client: the joined
/// opportunity fields plus the save timestamp.
#[derive(Debug, Serialize)]
pub struct BookmarkedOpportunity {
    pub opportunity_id: String,
    pub title: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub kind: String,
    pub deadline: Option<NaiveDate>,
    pub saved_at: DateTime<FixedOffset>,
}

/// Checks the user first, then the opportunity, then an existing bookmark,
/// so each failure keeps its own status.
pub async fn add_bookmark(
    db: &DatabaseConnection,
    user_uid: &str,
    opportunity_id: &str,
) -> Result<BookmarkAdd, ServiceError> {
    let user = UserEntity::find_by_id(user_uid)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    if user.is_none() {
        return Ok(BookmarkAdd::UnknownUser);
    }

    let opp = OpportunityEntity::find_by_id(opportunity_id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    if opp.is_none() {
        return Ok(BookmarkAdd::UnknownOpportunity);
    }

    let existing = BookmarkEntity::find_by_id((user_uid.to_string(), opportunity_id.to_string()))
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    if existing.is_some() {
        return Ok(BookmarkAdd::AlreadyBookmarked);
    }

    let am = bookmark::ActiveModel {
        user_uid: Set(user_uid.to_string()),
        opportunity_id: Set(opportunity_id.to_string()),
        saved_at: Set(Utc::now().into()),
    };
    am.insert(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(BookmarkAdd::Added)
}

pub async fn remove_bookmark(
    db: &DatabaseConnection,
    user_uid: &str,
    opportunity_id: &str,
) -> Result<bool, ServiceError> {
    let res = BookmarkEntity::delete_by_id((user_uid.to_string(), opportunity_id.to_string()))
        .exec(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(res.rows_affected > 0)
}

pub async fn is_bookmarked(
    db: &DatabaseConnection,
    user_uid: &str,
    opportunity_id: &str,
) -> Result<bool, ServiceError> {
    let found = BookmarkEntity::find_by_id((user_uid.to_string(), opportunity_id.to_string()))
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(found.is_some())
}

/// Bookmarked opportunities for a user, most recently saved first.
pub async fn list_for_user(
    db: &DatabaseConnection,
    user_uid: &str,
) -> Result<Vec<BookmarkedOpportunity>, ServiceError> {
    let rows = BookmarkEntity::find()
        .filter(bookmark::Column::UserUid.eq(user_uid))
        .find_also_related(opportunity::Entity)
        .order_by_desc(bookmark::Column::SavedAt)
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;

    Ok(rows
        .into_iter()
        .filter_map(|(b, opp)| {
            opp.map(|o| BookmarkedOpportunity {
                opportunity_id: o.id,
                title: o.title,
                description: o.description,
                image_url: o.image_url,
                kind: o.kind,
                deadline: o.deadline,
                saved_at: b.saved_at,
            })
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opportunity_service::{self, NewOpportunity};
    use crate::test_support::{get_db, unique_uid};
    use crate::user_service::{self, NewUser};

    #[tokio::test]
    async fn bookmark_flow() -> Result<(), anyhow::Error> {
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

        let uid = unique_uid("svc_bm");
        user_service::register(
            &db,
            NewUser {
                uid: uid.clone(),
                email: None,
                username: format!("bm_{uid}"),
                role: None,
                school: None,
                avatar: None,
            },
        )
        .await?;
        let opp = opportunity_service::create_opportunity(
            &db,
            NewOpportunity {
                title: "Hackathon 2026".into(),
                description: None,
                content_url: None,
                image_url: None,
                kind: "contest".into(),
                deadline: None,
            },
        )
        .await?;

        // Check order: unknown user first, then unknown opportunity
        assert_eq!(add_bookmark(&db, "missing-user", &opp.id).await?, BookmarkAdd::UnknownUser);
        assert_eq!(add_bookmark(&db, &uid, "OP0").await?, BookmarkAdd::UnknownOpportunity);

        assert_eq!(add_bookmark(&db, &uid, &opp.id).await?, BookmarkAdd::Added);
        assert_eq!(add_bookmark(&db, &uid, &opp.id).await?, BookmarkAdd::AlreadyBookmarked);
        assert!(is_bookmarked(&db, &uid, &opp.id).await?);

        let saved = list_for_user(&db, &uid).await?;
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].title, "Hackathon 2026");
        assert_eq!(saved[0].kind, "contest");

        assert!(remove_bookmark(&db, &uid, &opp.id).await?);
        assert!(!remove_bookmark(&db, &uid, &opp.id).await?);
        assert!(!is_bookmarked(&db, &uid, &opp.id).await?);

        // cleanup
        opportunity_service::delete_opportunity(&db, &opp.id).await?;
        user_service::delete_user(&db, &uid).await?;
        Ok(())
    }
}
