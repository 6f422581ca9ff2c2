//! Rollup data types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use campaignops_shared::types::{CampaignId, TeamId};

/// A team's role on the campaign, when it participates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamParticipation {
    /// Role on the campaign.
    pub role: Option<String>,
    /// Whether the team leads the campaign.
    pub is_lead: bool,
}

/// Total allocated to one team across a campaign's budget lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamAllocationTotal {
    /// Team.
    pub team_id: TeamId,
    /// Sum of allocations.
    pub allocated: Decimal,
    /// Share of the campaign's planned total, in percent.
    pub share_percent: Option<Decimal>,
    /// Campaign participation, if the team is registered on the campaign.
    pub participation: Option<TeamParticipation>,
}

/// Campaign-level planned vs. actual totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignRollup {
    /// Campaign.
    pub campaign_id: CampaignId,
    /// Budget the campaign was sold with.
    pub total_budget: Decimal,
    /// Sum of budget line amounts.
    pub planned_total: Decimal,
    /// `total_budget - planned_total`; negative when over-planned.
    pub remaining_budget: Decimal,
    /// `planned_total > total_budget`. A warning, not an error.
    pub over_planned: bool,
    /// Sum of actual spend.
    pub actual_total: Decimal,
    /// Sum of measured results.
    pub actual_result_total: Decimal,
    /// Actual spend as a percentage of the total budget.
    pub spend_utilization_percent: Option<Decimal>,
    /// Sum of all team allocations.
    pub allocated_total: Decimal,
    /// `planned_total - allocated_total`.
    pub unallocated_total: Decimal,
    /// Per-team allocation totals, ordered by team ID.
    pub team_allocations: Vec<TeamAllocationTotal>,
    /// Number of budget lines.
    pub budget_line_count: usize,
    /// Number of result lines.
    pub result_line_count: usize,
}
