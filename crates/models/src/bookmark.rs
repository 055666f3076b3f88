use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{opportunity, user};

/// User ↔ opportunity association; the composite key keeps it unique per
/// (user, opportunity).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bookmark")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_uid: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub opportunity_id: String,
    pub saved_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    User,
    Opportunity,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::User => Entity::belongs_to(user::Entity)
                .from(Column::UserUid)
                .to(user::Column::Uid)
                .into(),
            Relation::Opportunity => Entity::belongs_to(opportunity::Entity)
                .from(Column::OpportunityId)
                .to(opportunity::Column::Id)
                .into(),
        }
    }
}

impl Related<user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<opportunity::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Opportunity.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
