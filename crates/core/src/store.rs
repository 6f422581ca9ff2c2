//! Persistence seam for campaign records.

use std::future::Future;

use campaignops_shared::types::{BudgetLineId, CampaignId, TeamId};

use crate::campaign::{
    BudgetLine, BudgetTeam, Campaign, CampaignKpi, CampaignTeam, PeriodFilter, ResultLine, Team,
};
use crate::error::CampaignError;

/// Read access to campaign records.
///
/// This trait is implemented by the db crate to provide actual database operations.
pub trait CampaignStore: Send + Sync {
    /// Find a campaign by ID.
    fn find_campaign(
        &self,
        id: CampaignId,
    ) -> impl Future<Output = Result<Option<Campaign>, CampaignError>> + Send;

    /// Find a budget line by ID.
    fn find_budget_line(
        &self,
        id: BudgetLineId,
    ) -> impl Future<Output = Result<Option<BudgetLine>, CampaignError>> + Send;

    /// List a campaign's budget lines within the filter.
    fn list_budget_lines(
        &self,
        campaign_id: CampaignId,
        filter: &PeriodFilter,
    ) -> impl Future<Output = Result<Vec<BudgetLine>, CampaignError>> + Send;

    /// List a campaign's result lines within the filter.
    fn list_results(
        &self,
        campaign_id: CampaignId,
        filter: &PeriodFilter,
    ) -> impl Future<Output = Result<Vec<ResultLine>, CampaignError>> + Send;

    /// List a campaign's KPIs.
    fn list_kpis(
        &self,
        campaign_id: CampaignId,
    ) -> impl Future<Output = Result<Vec<CampaignKpi>, CampaignError>> + Send;

    /// List team allocations for the given budget lines.
    fn list_budget_teams(
        &self,
        budget_line_ids: &[BudgetLineId],
    ) -> impl Future<Output = Result<Vec<BudgetTeam>, CampaignError>> + Send;

    /// List the teams participating in a campaign.
    fn list_campaign_teams(
        &self,
        campaign_id: CampaignId,
    ) -> impl Future<Output = Result<Vec<CampaignTeam>, CampaignError>> + Send;

    /// Fetch the teams with the given IDs; missing IDs are simply absent.
    fn list_teams(
        &self,
        ids: &[TeamId],
    ) -> impl Future<Output = Result<Vec<Team>, CampaignError>> + Send;
}
