use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use serde::{Deserialize, Serialize};

use crate::errors::ServiceError;
use models::user::{self, Entity as UserEntity};

/// Profile registration payload; the account itself already exists on the
/// identity provider side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub uid: String,
    #[serde(default)]
    pub email: Option<String>,
    pub username: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub school: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUser {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub school: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
}

/// Create the profile row for a provider account. Role defaults to student.
pub async fn register(db: &DatabaseConnection, input: NewUser) -> Result<user::Model, ServiceError> {
    user::validate_uid(&input.uid)?;
    user::validate_username(&input.username)?;
    let role = user::validate_role(input.role.as_deref().unwrap_or(user::ROLE_STUDENT))?;

    let existing = UserEntity::find()
        .filter(
            Condition::any()
                .add(user::Column::Uid.eq(input.uid.clone()))
                .add(user::Column::Username.eq(input.username.clone())),
        )
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    if existing.is_some() {
        return Err(ServiceError::Conflict("user already exists".into()));
    }

    let created = user::create(
        db,
        &input.uid,
        input.email,
        &input.username,
        &role,
        input.school,
        input.avatar,
    )
    .await?;
    Ok(created)
}

pub async fn get_user(db: &DatabaseConnection, uid: &str) -> Result<Option<user::Model>, ServiceError> {
    UserEntity::find_by_id(uid)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}

pub async fn list_users(db: &DatabaseConnection) -> Result<Vec<user::Model>, ServiceError> {
    UserEntity::find()
        .order_by_desc(user::Column::CreatedAt)
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}

pub async fn list_by_role(db: &DatabaseConnection, role: &str) -> Result<Vec<user::Model>, ServiceError> {
    UserEntity::find()
        .filter(user::Column::Role.eq(role))
        .order_by_desc(user::Column::CreatedAt)
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}

/// Partial update; returns false when the user does not exist or nothing
/// was provided to change.
pub async fn update_user(
    db: &DatabaseConnection,
    uid: &str,
    changes: UpdateUser,
) -> Result<bool, ServiceError> {
    let current = UserEntity::find_by_id(uid)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    let Some(existing) = current else { return Ok(false) };

    let mut am: user::ActiveModel = existing.into();
    let mut changed = false;
    if let Some(email) = changes.email {
        am.email = Set(Some(email));
        changed = true;
    }
    if let Some(username) = changes.username {
        user::validate_username(&username)?;
        am.username = Set(username);
        changed = true;
    }
    if let Some(role) = changes.role {
        let role = user::validate_role(&role)?;
        am.role = Set(role);
        changed = true;
    }
    if let Some(school) = changes.school {
        am.school = Set(Some(school));
        changed = true;
    }
    if let Some(avatar) = changes.avatar {
        am.avatar = Set(Some(avatar));
        changed = true;
    }
    if !changed {
        return Ok(false);
    }
    am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(true)
}

pub async fn update_avatar(
    db: &DatabaseConnection,
    uid: &str,
    avatar: &str,
) -> Result<bool, ServiceError> {
    let current = UserEntity::find_by_id(uid)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    let Some(existing) = current else { return Ok(false) };

    let mut am: user::ActiveModel = existing.into();
    am.avatar = Set(Some(avatar.to_string()));
    am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(true)
}

/// Delete a user; returns true if a row was removed. Bookmarks cascade.
pub async fn delete_user(db: &DatabaseConnection, uid: &str) -> Result<bool, ServiceError> {
    let res = UserEntity::delete_by_id(uid)
        .exec(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(res.rows_affected > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{get_db, unique_uid};

    #[tokio::test]
    async fn user_profile_crud() -> Result<(), anyhow::Error> {
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

        let uid = unique_uid("svc_user");
        let created = register(
            &db,
            NewUser {
                uid: uid.clone(),
                email: Some("an@example.com".into()),
                username: format!("an_{uid}"),
                role: None,
                school: Some("HUST".into()),
                avatar: None,
            },
        )
        .await?;
        assert_eq!(created.role, user::ROLE_STUDENT);

        // Same uid again conflicts
        let dup = register(
            &db,
            NewUser {
                uid: uid.clone(),
                email: None,
                username: format!("other_{uid}"),
                role: None,
                school: None,
                avatar: None,
            },
        )
        .await;
        assert!(matches!(dup, Err(ServiceError::Conflict(_))));

        let found = get_user(&db, &uid).await?.expect("registered user");
        assert_eq!(found.school.as_deref(), Some("HUST"));

        let changed = update_user(
            &db,
            &uid,
            UpdateUser { role: Some("admin".into()), ..UpdateUser::default() },
        )
        .await?;
        assert!(changed);
        let found = get_user(&db, &uid).await?.expect("updated user");
        assert_eq!(found.role, user::ROLE_ADMIN);

        let admins = list_by_role(&db, user::ROLE_ADMIN).await?;
        assert!(admins.iter().any(|u| u.uid == uid));

        // Empty change set reports no update
        assert!(!update_user(&db, &uid, UpdateUser::default()).await?);

        assert!(update_avatar(&db, &uid, "https://cdn.example.com/a.png").await?);
        assert!(!update_avatar(&db, "missing-uid", "x").await?);

        assert!(delete_user(&db, &uid).await?);
        assert!(!delete_user(&db, &uid).await?);
        Ok(())
    }

    #[tokio::test]
    async fn register_rejects_bad_role() -> Result<(), anyhow::Error> {
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

        let uid = unique_uid("svc_badrole");
        let res = register(
            &db,
            NewUser {
                uid: uid.clone(),
                email: None,
                username: format!("u_{uid}"),
                role: Some("teacher".into()),
                school: None,
                avatar: None,
            },
        )
        .await;
        assert!(matches!(res, Err(ServiceError::Model(_))));
        Ok(())
    }
}
