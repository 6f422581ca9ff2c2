//! Mapping between `SeaORM` models and core domain records.

use campaignops_core::campaign::{
    BudgetLine, BudgetTeam, Campaign, CampaignKpi, CampaignTeam, Client, ResultLine, Team,
    YearMonth,
};
use campaignops_shared::types::{
    BudgetLineId, BudgetTeamId, CampaignId, CampaignKpiId, CampaignTeamId, ClientId,
    ResultLineId, TeamId, UserId,
};

use crate::entities::{
    budget_teams, budgets, campaign_kpis, campaign_teams, campaigns, clients, results, teams,
};
use crate::error::StoreError;

/// Converts a validated month into its column value.
pub(crate) fn month_column(month: u32) -> Result<i32, StoreError> {
    i32::try_from(month).map_err(|_| StoreError::Corrupt(format!("month {month} is out of range")))
}

fn period(table: &str, id: uuid::Uuid, year: i32, month: i32) -> Result<YearMonth, StoreError> {
    YearMonth::from_parts(Some(year), Some(month))
        .map_err(|e| StoreError::Corrupt(format!("{table} {id}: {e}")))?
        .ok_or_else(|| StoreError::Corrupt(format!("{table} {id}: missing period")))
}

pub(crate) fn client(m: clients::Model) -> Client {
    Client {
        id: ClientId::from_uuid(m.id),
        name: m.name,
        manager_id: m.manager_id.map(UserId::from_uuid),
        sales_channel: m.sales_channel,
        sales_department: m.sales_department,
        business_division: m.business_division,
    }
}

pub(crate) fn campaign(m: campaigns::Model) -> Result<Campaign, StoreError> {
    let start = period("campaign", m.id, m.start_year, m.start_month)?;
    let end = YearMonth::from_parts(m.end_year, m.end_month)
        .map_err(|e| StoreError::Corrupt(format!("campaign {}: {e}", m.id)))?;

    Ok(Campaign {
        id: CampaignId::from_uuid(m.id),
        client_id: ClientId::from_uuid(m.client_id),
        name: m.name,
        total_budget: m.total_budget,
        start,
        end,
    })
}

pub(crate) fn budget_line(m: budgets::Model) -> Result<BudgetLine, StoreError> {
    Ok(BudgetLine {
        id: BudgetLineId::from_uuid(m.id),
        campaign_id: CampaignId::from_uuid(m.campaign_id),
        period: period("budget", m.id, m.year, m.month)?,
        platform: m.platform,
        operation_type: m.operation_type,
        budget_type: m.budget_type,
        amount: m.amount,
        target_kpi: m.target_kpi,
        target_value: m.target_value,
    })
}

pub(crate) fn result_line(m: results::Model) -> Result<ResultLine, StoreError> {
    Ok(ResultLine {
        id: ResultLineId::from_uuid(m.id),
        campaign_id: CampaignId::from_uuid(m.campaign_id),
        period: period("result", m.id, m.year, m.month)?,
        platform: m.platform,
        operation_type: m.operation_type,
        budget_type: m.budget_type,
        actual_spend: m.actual_spend,
        actual_result: m.actual_result,
    })
}

pub(crate) fn team(m: teams::Model) -> Team {
    Team {
        id: TeamId::from_uuid(m.id),
        name: m.name,
    }
}

pub(crate) fn budget_team(m: budget_teams::Model) -> BudgetTeam {
    BudgetTeam {
        id: BudgetTeamId::from_uuid(m.id),
        budget_line_id: BudgetLineId::from_uuid(m.budget_id),
        team_id: TeamId::from_uuid(m.team_id),
        allocation: m.allocation,
    }
}

pub(crate) fn campaign_team(m: campaign_teams::Model) -> CampaignTeam {
    CampaignTeam {
        id: CampaignTeamId::from_uuid(m.id),
        campaign_id: CampaignId::from_uuid(m.campaign_id),
        team_id: TeamId::from_uuid(m.team_id),
        role: m.role,
        is_lead: m.is_lead,
    }
}

pub(crate) fn kpi(m: campaign_kpis::Model) -> CampaignKpi {
    CampaignKpi {
        id: CampaignKpiId::from_uuid(m.id),
        campaign_id: CampaignId::from_uuid(m.campaign_id),
        kpi_type: m.kpi_type,
        unit: m.unit,
        target_value: m.target_value,
        actual_value: m.actual_value,
        priority: m.priority,
    }
}
