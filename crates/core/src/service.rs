//! Caller-facing campaign analytics.

use std::collections::HashSet;
use std::sync::Arc;

use campaignops_shared::types::{BudgetLineId, CampaignId};

use crate::allocation::{AllocationSummary, AllocationValidator, ProposedAllocation};
use crate::campaign::{Campaign, PeriodFilter};
use crate::error::CampaignError;
use crate::reconciliation::{KpiAchievement, ReconciliationEngine, ReconciliationReport};
use crate::rollup::{CampaignRollup, RollupService};
use crate::store::CampaignStore;

/// Allocation checks, reconciliation and rollups over a campaign store.
pub struct CampaignAnalytics<S: CampaignStore> {
    store: Arc<S>,
}

impl<S: CampaignStore> CampaignAnalytics<S> {
    /// Create a new analytics service.
    #[must_use]
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Validate proposed team allocations against a budget line.
    ///
    /// Pure check: nothing is written. Callers that persist the allocation must
    /// repeat the check under a per-budget-line lock (see the db crate's
    /// `AllocationRepository`).
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The budget line or a proposed team does not exist
    /// - A team is proposed twice or with a negative amount
    /// - The resulting allocation sum exceeds the budget line amount
    pub async fn validate_allocation(
        &self,
        budget_line_id: BudgetLineId,
        proposed: &[ProposedAllocation],
    ) -> Result<AllocationSummary, CampaignError> {
        let budget = self
            .store
            .find_budget_line(budget_line_id)
            .await?
            .ok_or_else(|| CampaignError::budget_line_not_found(budget_line_id))?;

        let team_ids: Vec<_> = proposed.iter().map(|p| p.team_id).collect();
        let known: HashSet<_> = self
            .store
            .list_teams(&team_ids)
            .await?
            .into_iter()
            .map(|t| t.id)
            .collect();
        if let Some(missing) = team_ids.iter().find(|id| !known.contains(id)) {
            return Err(CampaignError::team_not_found(*missing));
        }

        let existing = self.store.list_budget_teams(&[budget_line_id]).await?;
        AllocationValidator::validate(&budget, &existing, proposed)
    }

    /// Reconcile planned budget lines against actual results.
    ///
    /// # Errors
    ///
    /// Returns `CampaignError::InvalidPeriod` for a malformed filter and
    /// `CampaignError::NotFound` if the campaign does not exist.
    pub async fn reconcile_budget_vs_result(
        &self,
        campaign_id: CampaignId,
        filter: Option<PeriodFilter>,
    ) -> Result<ReconciliationReport, CampaignError> {
        let filter = filter.unwrap_or_default();
        filter.validate()?;

        let campaign = self.campaign(campaign_id).await?;
        let budgets = self.store.list_budget_lines(campaign.id, &filter).await?;
        let results = self.store.list_results(campaign.id, &filter).await?;

        Ok(ReconciliationEngine::reconcile(
            campaign.id,
            &budgets,
            &results,
            &filter,
        ))
    }

    /// Compute achievement for each of a campaign's KPIs.
    ///
    /// # Errors
    ///
    /// Returns `CampaignError::NotFound` if the campaign does not exist.
    pub async fn reconcile_kpis(
        &self,
        campaign_id: CampaignId,
    ) -> Result<Vec<KpiAchievement>, CampaignError> {
        let campaign = self.campaign(campaign_id).await?;
        let kpis = self.store.list_kpis(campaign.id).await?;
        Ok(ReconciliationEngine::reconcile_kpis(&kpis))
    }

    /// Compute campaign-level totals.
    ///
    /// # Errors
    ///
    /// Returns `CampaignError::NotFound` if the campaign does not exist.
    pub async fn rollup(&self, campaign_id: CampaignId) -> Result<CampaignRollup, CampaignError> {
        let campaign = self.campaign(campaign_id).await?;
        let all = PeriodFilter::all();

        let budgets = self.store.list_budget_lines(campaign.id, &all).await?;
        let results = self.store.list_results(campaign.id, &all).await?;
        let line_ids: Vec<_> = budgets.iter().map(|b| b.id).collect();
        let allocations = self.store.list_budget_teams(&line_ids).await?;
        let teams = self.store.list_campaign_teams(campaign.id).await?;

        Ok(RollupService::compute(
            &campaign,
            &budgets,
            &results,
            &allocations,
            &teams,
        ))
    }

    async fn campaign(&self, id: CampaignId) -> Result<Campaign, CampaignError> {
        self.store
            .find_campaign(id)
            .await?
            .ok_or_else(|| CampaignError::campaign_not_found(id))
    }
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;
