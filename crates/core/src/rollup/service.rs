//! Campaign rollup calculation.

use std::collections::{BTreeMap, HashMap, HashSet};

use rust_decimal::Decimal;

use campaignops_shared::types::TeamId;

use super::types::{CampaignRollup, TeamAllocationTotal, TeamParticipation};
use crate::campaign::{BudgetLine, BudgetTeam, Campaign, CampaignTeam, ResultLine};
use crate::reconciliation::engine::percent_of;

/// Service for campaign-level aggregates.
pub struct RollupService;

impl RollupService {
    /// Derives campaign totals from its budget lines, result lines and allocations.
    ///
    /// Rows belonging to other campaigns are ignored, and allocations count
    /// only when their budget line is one of this campaign's lines.
    #[must_use]
    pub fn compute(
        campaign: &Campaign,
        budgets: &[BudgetLine],
        results: &[ResultLine],
        allocations: &[BudgetTeam],
        teams: &[CampaignTeam],
    ) -> CampaignRollup {
        let budgets: Vec<&BudgetLine> = budgets
            .iter()
            .filter(|b| b.campaign_id == campaign.id)
            .collect();
        let results: Vec<&ResultLine> = results
            .iter()
            .filter(|r| r.campaign_id == campaign.id)
            .collect();

        let planned_total: Decimal = budgets.iter().map(|b| b.amount).sum();
        let actual_total: Decimal = results.iter().map(|r| r.actual_spend).sum();
        let actual_result_total: Decimal = results.iter().map(|r| r.actual_result).sum();

        let line_ids: HashSet<_> = budgets.iter().map(|b| b.id).collect();
        let mut per_team: BTreeMap<TeamId, Decimal> = BTreeMap::new();
        for row in allocations
            .iter()
            .filter(|a| line_ids.contains(&a.budget_line_id))
        {
            *per_team.entry(row.team_id).or_default() += row.allocation;
        }
        let allocated_total: Decimal = per_team.values().copied().sum();

        let participation: HashMap<TeamId, &CampaignTeam> = teams
            .iter()
            .filter(|t| t.campaign_id == campaign.id)
            .map(|t| (t.team_id, t))
            .collect();

        let team_allocations = per_team
            .into_iter()
            .map(|(team_id, allocated)| TeamAllocationTotal {
                team_id,
                allocated,
                share_percent: percent_of(allocated, planned_total),
                participation: participation.get(&team_id).map(|t| TeamParticipation {
                    role: t.role.clone(),
                    is_lead: t.is_lead,
                }),
            })
            .collect();

        CampaignRollup {
            campaign_id: campaign.id,
            total_budget: campaign.total_budget,
            planned_total,
            remaining_budget: campaign.total_budget - planned_total,
            over_planned: planned_total > campaign.total_budget,
            actual_total,
            actual_result_total,
            spend_utilization_percent: percent_of(actual_total, campaign.total_budget),
            allocated_total,
            unallocated_total: planned_total - allocated_total,
            team_allocations,
            budget_line_count: budgets.len(),
            result_line_count: results.len(),
        }
    }
}
