use chrono::Utc;
use sea_orm::{entity::prelude::*, DatabaseConnection, Set};
use serde::{Deserialize, Serialize};

use crate::errors;

/// Accepted opportunity kinds.
pub const KINDS: [&str; 3] = ["scholarship", "contest", "event"];

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "opportunity")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub content_url: Option<String>,
    pub image_url: Option<String>,
    pub kind: String,
    pub deadline: Option<Date>,
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

pub fn validate_title(title: &str) -> Result<(), errors::ModelError> {
    if title.trim().is_empty() {
        return Err(errors::ModelError::Validation("title required".into()));
    }
    Ok(())
}

/// Normalize to lowercase and check against the accepted kinds.
pub fn validate_kind(kind: &str) -> Result<String, errors::ModelError> {
    let low = kind.to_ascii_lowercase();
    if !KINDS.contains(&low.as_str()) {
        return Err(errors::ModelError::Validation(
            "invalid kind, expected scholarship, contest or event".into(),
        ));
    }
    Ok(low)
}

#[allow(clippy::too_many_arguments)]
pub async fn create(
    db: &DatabaseConnection,
    id: &str,
    title: &str,
    description: Option<String>,
    content_url: Option<String>,
    image_url: Option<String>,
    kind: &str,
    deadline: Option<Date>,
) -> Result<Model, errors::ModelError> {
    validate_title(title)?;
    let kind = validate_kind(kind)?;
    let am = ActiveModel {
        id: Set(id.to_string()),
        title: Set(title.to_string()),
        description: Set(description),
        content_url: Set(content_url),
        image_url: Set(image_url),
        kind: Set(kind),
        deadline: Set(deadline),
        created_at: Set(Utc::now().into()),
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_is_normalized_and_checked() {
        assert_eq!(validate_kind("Scholarship").unwrap(), "scholarship");
        assert_eq!(validate_kind("EVENT").unwrap(), "event");
        assert!(validate_kind("internship").is_err());
    }

    #[test]
    fn blank_title_is_rejected() {
        assert!(validate_title(" ").is_err());
        assert!(validate_title("ASEAN Scholarship 2026").is_ok());
    }
}
