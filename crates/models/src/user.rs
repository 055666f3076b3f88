use chrono::Utc;
use sea_orm::{entity::prelude::*, DatabaseConnection, Set};
use serde::{Deserialize, Serialize};

use crate::errors;

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_STUDENT: &str = "student";

/// Application profile keyed by the Firebase UID. Credentials never touch
/// this table; the identity provider owns them.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub uid: String,
    pub email: Option<String>,
    pub username: String,
    pub role: String,
    pub school: Option<String>,
    pub avatar: Option<String>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Bookmarks,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Bookmarks => Entity::has_many(crate::bookmark::Entity).into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Accepted roles; anything else is rejected before touching the database.
pub fn validate_role(role: &str) -> Result<String, errors::ModelError> {
    let low = role.to_ascii_lowercase();
    if low != ROLE_ADMIN && low != ROLE_STUDENT {
        return Err(errors::ModelError::Validation(
            "invalid role, expected admin or student".into(),
        ));
    }
    Ok(low)
}

pub fn validate_uid(uid: &str) -> Result<(), errors::ModelError> {
    if uid.trim().is_empty() {
        return Err(errors::ModelError::Validation("uid required".into()));
    }
    Ok(())
}

pub fn validate_username(username: &str) -> Result<(), errors::ModelError> {
    if username.trim().is_empty() {
        return Err(errors::ModelError::Validation("username required".into()));
    }
    Ok(())
}

pub async fn create(
    db: &DatabaseConnection,
    uid: &str,
    email: Option<String>,
    username: &str,
    role: &str,
    school: Option<String>,
    avatar: Option<String>,
) -> Result<Model, errors::ModelError> {
    validate_uid(uid)?;
    validate_username(username)?;
    let role = validate_role(role)?;
    let am = ActiveModel {
        uid: Set(uid.to_string()),
        email: Set(email),
        username: Set(username.to_string()),
        role: Set(role),
        school: Set(school),
        avatar: Set(avatar),
        created_at: Set(Utc::now().into()),
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_is_normalized_and_checked() {
        assert_eq!(validate_role("Admin").unwrap(), ROLE_ADMIN);
        assert_eq!(validate_role("student").unwrap(), ROLE_STUDENT);
        assert!(validate_role("teacher").is_err());
        assert!(validate_role("").is_err());
    }

    #[test]
    fn blank_identifiers_are_rejected() {
        assert!(validate_uid("  ").is_err());
        assert!(validate_uid("firebase-uid-1").is_ok());
        assert!(validate_username("").is_err());
        assert!(validate_username("minh").is_ok());
    }
}
