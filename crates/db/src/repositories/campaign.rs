//! Validated writes for clients, campaigns, budget lines, results, KPIs and teams.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, Set, SqlErr};
use tracing::info;

use campaignops_core::CampaignError;
use campaignops_core::campaign::{
    BudgetLine, Campaign, CampaignKpi, CampaignTeam, CampaignValidator, Client,
    CreateBudgetLineInput, CreateCampaignInput, CreateCampaignKpiInput, CreateClientInput,
    CreateResultLineInput, ResultLine, Team, UpdateCampaignInput,
};
use campaignops_shared::types::{
    BudgetLineId, CampaignId, CampaignKpiId, CampaignTeamId, ClientId, ResultLineId, TeamId,
    UserId,
};

use super::convert::{self, month_column};
use crate::entities::{
    budgets, campaign_kpis, campaign_teams, campaigns, clients, results, teams,
};
use crate::error::StoreError;

/// Repository for campaign record writes.
#[derive(Debug, Clone)]
pub struct CampaignRepository {
    db: DatabaseConnection,
}

impl CampaignRepository {
    /// Creates a new campaign repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a client.
    ///
    /// # Errors
    ///
    /// Returns an error if the classification is blank or the insert fails.
    pub async fn create_client(&self, input: CreateClientInput) -> Result<Client, StoreError> {
        CampaignValidator::validate_client(&input)?;

        let now = now();
        let model = clients::ActiveModel {
            id: Set(ClientId::new().into_inner()),
            name: Set(input.name),
            manager_id: Set(input.manager_id.map(UserId::into_inner)),
            sales_channel: Set(input.sales_channel),
            sales_department: Set(input.sales_department),
            business_division: Set(input.business_division),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await?;

        info!(client_id = %model.id, "client created");
        Ok(convert::client(model))
    }

    /// Creates a campaign for an existing client.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The client does not exist
    /// - The total budget is negative or the period is invalid
    /// - Database operation fails
    pub async fn create_campaign(
        &self,
        input: CreateCampaignInput,
    ) -> Result<Campaign, StoreError> {
        CampaignValidator::validate_campaign(&input)?;

        clients::Entity::find_by_id(input.client_id.into_inner())
            .one(&self.db)
            .await?
            .ok_or_else(|| CampaignError::client_not_found(input.client_id))?;

        let now = now();
        let model = campaigns::ActiveModel {
            id: Set(CampaignId::new().into_inner()),
            client_id: Set(input.client_id.into_inner()),
            name: Set(input.name),
            total_budget: Set(input.total_budget),
            start_year: Set(input.start.year),
            start_month: Set(month_column(input.start.month)?),
            end_year: Set(input.end.map(|e| e.year)),
            end_month: Set(input.end.map(|e| month_column(e.month)).transpose()?),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await?;

        info!(campaign_id = %model.id, client_id = %model.client_id, "campaign created");
        convert::campaign(model)
    }

    /// Changes a campaign's name, total budget and period.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The campaign does not exist
    /// - The total budget is negative or the end precedes the start
    /// - Database operation fails
    pub async fn update_campaign(
        &self,
        id: CampaignId,
        input: UpdateCampaignInput,
    ) -> Result<Campaign, StoreError> {
        CampaignValidator::validate_campaign_update(&input)?;

        let model = campaigns::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?
            .ok_or_else(|| CampaignError::campaign_not_found(id))?;

        let mut active: campaigns::ActiveModel = model.into();
        active.name = Set(input.name);
        active.total_budget = Set(input.total_budget);
        active.start_year = Set(input.start.year);
        active.start_month = Set(month_column(input.start.month)?);
        active.end_year = Set(input.end.map(|e| e.year));
        active.end_month = Set(input.end.map(|e| month_column(e.month)).transpose()?);
        active.updated_at = Set(now());
        let model = active.update(&self.db).await?;

        info!(campaign_id = %id, total_budget = %model.total_budget, "campaign updated");
        convert::campaign(model)
    }

    /// Adds a planned budget line to a campaign.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The campaign does not exist
    /// - The amount is negative or the month is out of range
    /// - Database operation fails
    pub async fn create_budget_line(
        &self,
        input: CreateBudgetLineInput,
    ) -> Result<BudgetLine, StoreError> {
        CampaignValidator::validate_budget_line(&input)?;
        self.ensure_campaign(input.campaign_id).await?;

        let now = now();
        let model = budgets::ActiveModel {
            id: Set(BudgetLineId::new().into_inner()),
            campaign_id: Set(input.campaign_id.into_inner()),
            year: Set(input.period.year),
            month: Set(month_column(input.period.month)?),
            platform: Set(input.platform),
            operation_type: Set(input.operation_type),
            budget_type: Set(input.budget_type),
            amount: Set(input.amount),
            target_kpi: Set(input.target_kpi),
            target_value: Set(input.target_value),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await?;

        info!(
            budget_id = %model.id,
            campaign_id = %model.campaign_id,
            amount = %model.amount,
            "budget line created"
        );
        convert::budget_line(model)
    }

    /// Records an actual result line for a campaign.
    ///
    /// # Errors
    ///
    /// Returns an error if the campaign does not exist, the month is out of
    /// range, or the insert fails.
    pub async fn record_result(
        &self,
        input: CreateResultLineInput,
    ) -> Result<ResultLine, StoreError> {
        CampaignValidator::validate_result_line(&input)?;
        self.ensure_campaign(input.campaign_id).await?;

        let now = now();
        let model = results::ActiveModel {
            id: Set(ResultLineId::new().into_inner()),
            campaign_id: Set(input.campaign_id.into_inner()),
            year: Set(input.period.year),
            month: Set(month_column(input.period.month)?),
            platform: Set(input.platform),
            operation_type: Set(input.operation_type),
            budget_type: Set(input.budget_type),
            actual_spend: Set(input.actual_spend),
            actual_result: Set(input.actual_result),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await?;

        info!(result_id = %model.id, campaign_id = %model.campaign_id, "result recorded");
        convert::result_line(model)
    }

    /// Adds a KPI target to a campaign.
    ///
    /// # Errors
    ///
    /// Returns an error if the campaign does not exist or the insert fails.
    pub async fn create_kpi(&self, input: CreateCampaignKpiInput) -> Result<CampaignKpi, StoreError> {
        self.ensure_campaign(input.campaign_id).await?;

        let now = now();
        let model = campaign_kpis::ActiveModel {
            id: Set(CampaignKpiId::new().into_inner()),
            campaign_id: Set(input.campaign_id.into_inner()),
            kpi_type: Set(input.kpi_type),
            unit: Set(input.unit),
            target_value: Set(input.target_value),
            actual_value: Set(None),
            priority: Set(input.priority),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await?;

        Ok(convert::kpi(model))
    }

    /// Sets or clears the measured value of a KPI.
    ///
    /// # Errors
    ///
    /// Returns an error if the KPI does not exist or the update fails.
    pub async fn record_kpi_actual(
        &self,
        id: CampaignKpiId,
        actual_value: Option<Decimal>,
    ) -> Result<CampaignKpi, StoreError> {
        let model = campaign_kpis::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?
            .ok_or_else(|| CampaignError::kpi_not_found(id))?;

        let mut active: campaign_kpis::ActiveModel = model.into();
        active.actual_value = Set(actual_value);
        active.updated_at = Set(now());
        let model = active.update(&self.db).await?;

        info!(kpi_id = %id, "KPI actual recorded");
        Ok(convert::kpi(model))
    }

    /// Creates a team.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub async fn create_team(&self, name: &str) -> Result<Team, StoreError> {
        let model = teams::ActiveModel {
            id: Set(TeamId::new().into_inner()),
            name: Set(name.to_string()),
            created_at: Set(now()),
        }
        .insert(&self.db)
        .await?;

        Ok(convert::team(model))
    }

    /// Records a team's participation in a campaign.
    ///
    /// # Errors
    ///
    /// Returns an error if the campaign or team does not exist, the insert
    /// fails, or `StoreError::Conflict` if the team already participates.
    pub async fn add_campaign_team(
        &self,
        campaign_id: CampaignId,
        team_id: TeamId,
        role: Option<String>,
        is_lead: bool,
    ) -> Result<CampaignTeam, StoreError> {
        self.ensure_campaign(campaign_id).await?;
        teams::Entity::find_by_id(team_id.into_inner())
            .one(&self.db)
            .await?
            .ok_or_else(|| CampaignError::team_not_found(team_id))?;

        let model = campaign_teams::ActiveModel {
            id: Set(CampaignTeamId::new().into_inner()),
            campaign_id: Set(campaign_id.into_inner()),
            team_id: Set(team_id.into_inner()),
            role: Set(role),
            is_lead: Set(is_lead),
            created_at: Set(now()),
        }
        .insert(&self.db)
        .await
        .map_err(|e| {
            unique_violation(e, format!("team {team_id} already on campaign {campaign_id}"))
        })?;

        info!(campaign_id = %campaign_id, team_id = %team_id, is_lead, "team joined campaign");
        Ok(convert::campaign_team(model))
    }

    async fn ensure_campaign(&self, id: CampaignId) -> Result<(), StoreError> {
        campaigns::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?
            .ok_or_else(|| CampaignError::campaign_not_found(id))?;
        Ok(())
    }
}

fn unique_violation(err: DbErr, msg: String) -> StoreError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => StoreError::Conflict(msg),
        _ => StoreError::Database(err),
    }
}

fn now() -> DateTimeWithTimeZone {
    Utc::now().into()
}
