//! Schema bootstrap from the entity definitions.
//!
//! Creates every table and index if it does not exist yet. Running it twice
//! is a no-op; it does not alter existing tables.

use sea_orm::sea_query::{Index, IndexCreateStatement};
use sea_orm::{ConnectionTrait, DbErr, EntityTrait, Schema};
use tracing::info;

use crate::entities::{
    budget_teams, budgets, campaign_kpis, campaign_teams, campaigns, clients, results, teams,
};

/// Creates all campaignops tables and indexes.
///
/// Tables are created parent-first so foreign keys resolve.
///
/// # Errors
///
/// Returns an error if a DDL statement fails.
pub async fn create_schema<C: ConnectionTrait>(db: &C) -> Result<(), DbErr> {
    create_table(db, clients::Entity).await?;
    create_table(db, teams::Entity).await?;
    create_table(db, campaigns::Entity).await?;
    create_table(db, budgets::Entity).await?;
    create_table(db, results::Entity).await?;
    create_table(db, campaign_kpis::Entity).await?;
    create_table(db, budget_teams::Entity).await?;
    create_table(db, campaign_teams::Entity).await?;

    for index in indexes() {
        db.execute(db.get_database_backend().build(&index)).await?;
    }

    info!("schema is up to date");
    Ok(())
}

async fn create_table<C, E>(db: &C, entity: E) -> Result<(), DbErr>
where
    C: ConnectionTrait,
    E: EntityTrait,
{
    let backend = db.get_database_backend();
    let mut stmt = Schema::new(backend).create_table_from_entity(entity);
    stmt.if_not_exists();
    db.execute(backend.build(&stmt)).await?;
    Ok(())
}

fn indexes() -> Vec<IndexCreateStatement> {
    vec![
        Index::create()
            .name("uq_budget_teams_budget_team")
            .table(budget_teams::Entity)
            .col(budget_teams::Column::BudgetId)
            .col(budget_teams::Column::TeamId)
            .unique()
            .if_not_exists()
            .to_owned(),
        Index::create()
            .name("uq_campaign_teams_campaign_team")
            .table(campaign_teams::Entity)
            .col(campaign_teams::Column::CampaignId)
            .col(campaign_teams::Column::TeamId)
            .unique()
            .if_not_exists()
            .to_owned(),
        Index::create()
            .name("idx_budgets_campaign_period")
            .table(budgets::Entity)
            .col(budgets::Column::CampaignId)
            .col(budgets::Column::Year)
            .col(budgets::Column::Month)
            .if_not_exists()
            .to_owned(),
        Index::create()
            .name("idx_results_campaign_period")
            .table(results::Entity)
            .col(results::Column::CampaignId)
            .col(results::Column::Year)
            .col(results::Column::Month)
            .if_not_exists()
            .to_owned(),
    ]
}
