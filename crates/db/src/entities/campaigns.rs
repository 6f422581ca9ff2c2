//! `SeaORM` Entity for campaigns table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "campaigns")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub client_id: Uuid,
    pub name: String,
    #[sea_orm(column_type = "Decimal(Some((19, 4)))")]
    pub total_budget: Decimal,
    pub start_year: i32,
    pub start_month: i32,
    pub end_year: Option<i32>,
    pub end_month: Option<i32>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::clients::Entity",
        from = "Column::ClientId",
        to = "super::clients::Column::Id"
    )]
    Clients,
    #[sea_orm(has_many = "super::budgets::Entity")]
    Budgets,
    #[sea_orm(has_many = "super::results::Entity")]
    Results,
    #[sea_orm(has_many = "super::campaign_kpis::Entity")]
    CampaignKpis,
    #[sea_orm(has_many = "super::campaign_teams::Entity")]
    CampaignTeams,
}

impl Related<super::clients::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Clients.def()
    }
}

impl Related<super::budgets::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Budgets.def()
    }
}

impl Related<super::results::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Results.def()
    }
}

impl Related<super::campaign_kpis::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CampaignKpis.def()
    }
}

impl Related<super::campaign_teams::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CampaignTeams.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
