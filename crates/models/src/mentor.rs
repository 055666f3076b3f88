use chrono::Utc;
use sea_orm::{entity::prelude::*, DatabaseConnection, Set};
use serde::{Deserialize, Serialize};

use crate::errors;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "mentor")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub full_name: String,
    pub position: Option<String>,
    pub workplace: Option<String>,
    pub specialty: Option<String>,
    pub contact_url: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match *self {}
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_full_name(name: &str) -> Result<(), errors::ModelError> {
    if name.trim().is_empty() {
        return Err(errors::ModelError::Validation("full_name required".into()));
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub async fn create(
    db: &DatabaseConnection,
    id: &str,
    full_name: &str,
    position: Option<String>,
    workplace: Option<String>,
    specialty: Option<String>,
    contact_url: Option<String>,
    avatar_url: Option<String>,
) -> Result<Model, errors::ModelError> {
    validate_full_name(full_name)?;
    let am = ActiveModel {
        id: Set(id.to_string()),
        full_name: Set(full_name.to_string()),
        position: Set(position),
        workplace: Set(workplace),
        specialty: Set(specialty),
        contact_url: Set(contact_url),
        avatar_url: Set(avatar_url),
        created_at: Set(Utc::now().into()),
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}
