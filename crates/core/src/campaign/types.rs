//! Campaign domain records.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use campaignops_shared::types::{
    BudgetLineId, BudgetTeamId, CampaignId, CampaignKpiId, CampaignTeamId, ClientId,
    ResultLineId, TeamId, UserId,
};

use super::period::YearMonth;

/// A commercial account that owns campaigns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    /// Client ID.
    pub id: ClientId,
    /// Display name.
    pub name: String,
    /// Account manager, if assigned.
    pub manager_id: Option<UserId>,
    /// Sales channel classification.
    pub sales_channel: Option<String>,
    /// Sales department classification (always present).
    pub sales_department: String,
    /// Business division classification (always present).
    pub business_division: String,
}

/// A marketing campaign run for one client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Campaign {
    /// Campaign ID.
    pub id: CampaignId,
    /// Owning client.
    pub client_id: ClientId,
    /// Campaign name.
    pub name: String,
    /// Top-level budget the campaign was sold with.
    pub total_budget: Decimal,
    /// First month of the campaign.
    pub start: YearMonth,
    /// Last month of the campaign, if known.
    pub end: Option<YearMonth>,
}

/// Grouping key shared by budget lines and result lines.
///
/// Field order defines report order: period, platform, operation type, budget type.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LineKey {
    /// Calendar month.
    pub period: YearMonth,
    /// Advertising platform.
    pub platform: String,
    /// Operation type (e.g. managed, self-serve).
    pub operation_type: String,
    /// Budget type (e.g. media, production).
    pub budget_type: String,
}

/// One planned spending line for a campaign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetLine {
    /// Budget line ID.
    pub id: BudgetLineId,
    /// Parent campaign.
    pub campaign_id: CampaignId,
    /// Calendar month.
    pub period: YearMonth,
    /// Advertising platform.
    pub platform: String,
    /// Operation type.
    pub operation_type: String,
    /// Budget type.
    pub budget_type: String,
    /// Planned amount.
    pub amount: Decimal,
    /// KPI the line is targeting, if any.
    pub target_kpi: Option<String>,
    /// Target value for `target_kpi`.
    pub target_value: Option<Decimal>,
}

impl BudgetLine {
    /// Returns the reconciliation key of this line.
    #[must_use]
    pub fn key(&self) -> LineKey {
        LineKey {
            period: self.period,
            platform: self.platform.clone(),
            operation_type: self.operation_type.clone(),
            budget_type: self.budget_type.clone(),
        }
    }
}

/// One actual-performance line for a campaign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultLine {
    /// Result line ID.
    pub id: ResultLineId,
    /// Parent campaign.
    pub campaign_id: CampaignId,
    /// Calendar month.
    pub period: YearMonth,
    /// Advertising platform.
    pub platform: String,
    /// Operation type.
    pub operation_type: String,
    /// Budget type.
    pub budget_type: String,
    /// Money actually spent.
    pub actual_spend: Decimal,
    /// Measured result (conversions, impressions, ...).
    pub actual_result: Decimal,
}

impl ResultLine {
    /// Returns the reconciliation key of this line.
    #[must_use]
    pub fn key(&self) -> LineKey {
        LineKey {
            period: self.period,
            platform: self.platform.clone(),
            operation_type: self.operation_type.clone(),
            budget_type: self.budget_type.clone(),
        }
    }
}

/// A named group of people working on campaigns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    /// Team ID.
    pub id: TeamId,
    /// Team name.
    pub name: String,
}

/// Portion of a budget line assigned to a team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetTeam {
    /// Row ID.
    pub id: BudgetTeamId,
    /// Budget line being allocated.
    pub budget_line_id: BudgetLineId,
    /// Receiving team.
    pub team_id: TeamId,
    /// Allocated amount.
    pub allocation: Decimal,
}

/// A team's participation in a campaign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignTeam {
    /// Row ID.
    pub id: CampaignTeamId,
    /// Campaign.
    pub campaign_id: CampaignId,
    /// Participating team.
    pub team_id: TeamId,
    /// Role of the team on this campaign.
    pub role: Option<String>,
    /// Whether the team leads the campaign.
    pub is_lead: bool,
}

/// A KPI target and its measured value for a campaign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignKpi {
    /// KPI ID.
    pub id: CampaignKpiId,
    /// Campaign.
    pub campaign_id: CampaignId,
    /// KPI name (e.g. "CPA", "CTR").
    pub kpi_type: String,
    /// Unit of measure.
    pub unit: Option<String>,
    /// Target value.
    pub target_value: Decimal,
    /// Measured value; `None` until measured.
    pub actual_value: Option<Decimal>,
    /// Display order (ascending).
    pub priority: i32,
}

/// Input for creating a client.
#[derive(Debug, Clone)]
pub struct CreateClientInput {
    /// Display name.
    pub name: String,
    /// Account manager.
    pub manager_id: Option<UserId>,
    /// Sales channel.
    pub sales_channel: Option<String>,
    /// Sales department.
    pub sales_department: String,
    /// Business division.
    pub business_division: String,
}

/// Input for creating a campaign.
#[derive(Debug, Clone)]
pub struct CreateCampaignInput {
    /// Owning client.
    pub client_id: ClientId,
    /// Campaign name.
    pub name: String,
    /// Total budget.
    pub total_budget: Decimal,
    /// First month.
    pub start: YearMonth,
    /// Last month.
    pub end: Option<YearMonth>,
}

/// Input for changing a campaign's name, budget or period.
#[derive(Debug, Clone)]
pub struct UpdateCampaignInput {
    /// Campaign name.
    pub name: String,
    /// Total budget.
    pub total_budget: Decimal,
    /// First month.
    pub start: YearMonth,
    /// Last month.
    pub end: Option<YearMonth>,
}

/// Input for creating a budget line.
#[derive(Debug, Clone)]
pub struct CreateBudgetLineInput {
    /// Parent campaign.
    pub campaign_id: CampaignId,
    /// Calendar month.
    pub period: YearMonth,
    /// Platform.
    pub platform: String,
    /// Operation type.
    pub operation_type: String,
    /// Budget type.
    pub budget_type: String,
    /// Planned amount.
    pub amount: Decimal,
    /// Targeted KPI.
    pub target_kpi: Option<String>,
    /// Target value.
    pub target_value: Option<Decimal>,
}

/// Input for recording a result line.
#[derive(Debug, Clone)]
pub struct CreateResultLineInput {
    /// Parent campaign.
    pub campaign_id: CampaignId,
    /// Calendar month.
    pub period: YearMonth,
    /// Platform.
    pub platform: String,
    /// Operation type.
    pub operation_type: String,
    /// Budget type.
    pub budget_type: String,
    /// Money spent.
    pub actual_spend: Decimal,
    /// Measured result.
    pub actual_result: Decimal,
}

/// Input for creating a campaign KPI.
#[derive(Debug, Clone)]
pub struct CreateCampaignKpiInput {
    /// Campaign.
    pub campaign_id: CampaignId,
    /// KPI name.
    pub kpi_type: String,
    /// Unit of measure.
    pub unit: Option<String>,
    /// Target value.
    pub target_value: Decimal,
    /// Display order.
    pub priority: i32,
}
