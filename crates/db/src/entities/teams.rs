//! `SeaORM` Entity for teams table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "teams")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::budget_teams::Entity")]
    BudgetTeams,
    #[sea_orm(has_many = "super::campaign_teams::Entity")]
    CampaignTeams,
}

impl Related<super::budget_teams::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BudgetTeams.def()
    }
}

impl Related<super::campaign_teams::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CampaignTeams.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
