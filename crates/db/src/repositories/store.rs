//! `SeaORM` implementation of the core `CampaignStore` seam.

use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QueryTrait,
};

use campaignops_core::CampaignError;
use campaignops_core::CampaignStore;
use campaignops_core::campaign::{
    BudgetLine, BudgetTeam, Campaign, CampaignKpi, CampaignTeam, PeriodFilter, ResultLine, Team,
};
use campaignops_shared::types::{BudgetLineId, CampaignId, TeamId};

use super::convert::{self, month_column};
use crate::entities::{
    budget_teams, budgets, campaign_kpis, campaign_teams, campaigns, results, teams,
};
use crate::error::StoreError;

/// Read-only campaign store backed by PostgreSQL.
#[derive(Debug, Clone)]
pub struct SeaCampaignStore {
    db: DatabaseConnection,
}

impl SeaCampaignStore {
    /// Creates a new store.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn budget_lines(
        &self,
        campaign_id: CampaignId,
        filter: &PeriodFilter,
    ) -> Result<Vec<BudgetLine>, StoreError> {
        let month = filter.month.map(month_column).transpose()?;

        budgets::Entity::find()
            .filter(budgets::Column::CampaignId.eq(campaign_id.into_inner()))
            .apply_if(filter.year, |q, y| q.filter(budgets::Column::Year.eq(y)))
            .apply_if(month, |q, m| q.filter(budgets::Column::Month.eq(m)))
            .apply_if(filter.platform.clone(), |q, p| {
                q.filter(budgets::Column::Platform.eq(p))
            })
            .order_by_asc(budgets::Column::Year)
            .order_by_asc(budgets::Column::Month)
            .order_by_asc(budgets::Column::Platform)
            .order_by_asc(budgets::Column::OperationType)
            .order_by_asc(budgets::Column::BudgetType)
            .all(&self.db)
            .await?
            .into_iter()
            .map(convert::budget_line)
            .collect()
    }

    async fn result_lines(
        &self,
        campaign_id: CampaignId,
        filter: &PeriodFilter,
    ) -> Result<Vec<ResultLine>, StoreError> {
        let month = filter.month.map(month_column).transpose()?;

        results::Entity::find()
            .filter(results::Column::CampaignId.eq(campaign_id.into_inner()))
            .apply_if(filter.year, |q, y| q.filter(results::Column::Year.eq(y)))
            .apply_if(month, |q, m| q.filter(results::Column::Month.eq(m)))
            .apply_if(filter.platform.clone(), |q, p| {
                q.filter(results::Column::Platform.eq(p))
            })
            .order_by_asc(results::Column::Year)
            .order_by_asc(results::Column::Month)
            .order_by_asc(results::Column::Platform)
            .order_by_asc(results::Column::OperationType)
            .order_by_asc(results::Column::BudgetType)
            .all(&self.db)
            .await?
            .into_iter()
            .map(convert::result_line)
            .collect()
    }
}

impl CampaignStore for SeaCampaignStore {
    async fn find_campaign(&self, id: CampaignId) -> Result<Option<Campaign>, CampaignError> {
        let model = campaigns::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await
            .map_err(StoreError::from)?;
        Ok(model.map(convert::campaign).transpose()?)
    }

    async fn find_budget_line(
        &self,
        id: BudgetLineId,
    ) -> Result<Option<BudgetLine>, CampaignError> {
        let model = budgets::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await
            .map_err(StoreError::from)?;
        Ok(model.map(convert::budget_line).transpose()?)
    }

    async fn list_budget_lines(
        &self,
        campaign_id: CampaignId,
        filter: &PeriodFilter,
    ) -> Result<Vec<BudgetLine>, CampaignError> {
        Ok(self.budget_lines(campaign_id, filter).await?)
    }

    async fn list_results(
        &self,
        campaign_id: CampaignId,
        filter: &PeriodFilter,
    ) -> Result<Vec<ResultLine>, CampaignError> {
        Ok(self.result_lines(campaign_id, filter).await?)
    }

    async fn list_kpis(&self, campaign_id: CampaignId) -> Result<Vec<CampaignKpi>, CampaignError> {
        let models = campaign_kpis::Entity::find()
            .filter(campaign_kpis::Column::CampaignId.eq(campaign_id.into_inner()))
            .order_by_asc(campaign_kpis::Column::Priority)
            .order_by_asc(campaign_kpis::Column::KpiType)
            .all(&self.db)
            .await
            .map_err(StoreError::from)?;
        Ok(models.into_iter().map(convert::kpi).collect())
    }

    async fn list_budget_teams(
        &self,
        budget_line_ids: &[BudgetLineId],
    ) -> Result<Vec<BudgetTeam>, CampaignError> {
        if budget_line_ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = budget_teams::Entity::find()
            .filter(
                budget_teams::Column::BudgetId
                    .is_in(budget_line_ids.iter().copied().map(BudgetLineId::into_inner)),
            )
            .order_by_asc(budget_teams::Column::TeamId)
            .all(&self.db)
            .await
            .map_err(StoreError::from)?;
        Ok(models.into_iter().map(convert::budget_team).collect())
    }

    async fn list_campaign_teams(
        &self,
        campaign_id: CampaignId,
    ) -> Result<Vec<CampaignTeam>, CampaignError> {
        let models = campaign_teams::Entity::find()
            .filter(campaign_teams::Column::CampaignId.eq(campaign_id.into_inner()))
            .order_by_asc(campaign_teams::Column::TeamId)
            .all(&self.db)
            .await
            .map_err(StoreError::from)?;
        Ok(models.into_iter().map(convert::campaign_team).collect())
    }

    async fn list_teams(&self, ids: &[TeamId]) -> Result<Vec<Team>, CampaignError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = teams::Entity::find()
            .filter(teams::Column::Id.is_in(ids.iter().copied().map(TeamId::into_inner)))
            .all(&self.db)
            .await
            .map_err(StoreError::from)?;
        Ok(models.into_iter().map(convert::team).collect())
    }
}
