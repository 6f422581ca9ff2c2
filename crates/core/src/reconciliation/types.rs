//! Reconciliation report types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use campaignops_shared::types::{BudgetLineId, CampaignId, CampaignKpiId, ResultLineId};

use crate::campaign::{LineKey, PeriodFilter};

/// How a reconciliation group pairs up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineStatus {
    /// Both planned and actual rows exist for the key.
    Matched,
    /// Planned rows exist but nothing was spent or reported yet.
    OrphanBudget,
    /// Actual rows exist without a plan (unplanned spend).
    OrphanResult,
}

/// Planned vs. actual figures for one (period, platform, operation, budget type) group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VarianceRecord {
    /// Group key.
    pub key: LineKey,
    /// Sum of planned amounts (zero for an orphan result).
    pub planned_amount: Decimal,
    /// Sum of actual spend (zero for an orphan budget).
    pub actual_spend: Decimal,
    /// `actual_spend - planned_amount`.
    pub spend_variance: Decimal,
    /// Actual spend as a percentage of plan; `None` when nothing was planned.
    pub utilization_percent: Option<Decimal>,
    /// Sum of planned target values, if any line carries one.
    pub target_value: Option<Decimal>,
    /// Sum of measured results.
    pub actual_result: Decimal,
    /// `actual_result - target_value` when a target exists.
    pub result_variance: Option<Decimal>,
    /// Pairing status.
    pub status: LineStatus,
    /// Budget lines in this group.
    pub budget_line_ids: Vec<BudgetLineId>,
    /// Result lines in this group.
    pub result_line_ids: Vec<ResultLineId>,
}

/// Totals across a reconciliation report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationSummary {
    /// Total planned amount.
    pub planned_total: Decimal,
    /// Total actual spend.
    pub actual_spend_total: Decimal,
    /// `actual_spend_total - planned_total`.
    pub spend_variance_total: Decimal,
    /// Number of matched groups.
    pub matched: usize,
    /// Number of groups with plan but no actuals.
    pub orphan_budgets: usize,
    /// Number of groups with actuals but no plan.
    pub orphan_results: usize,
}

/// Budget vs. result report for one campaign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationReport {
    /// Campaign.
    pub campaign_id: CampaignId,
    /// Scope the report was computed for.
    pub filter: PeriodFilter,
    /// Groups ordered by year, month, platform, operation type, budget type.
    pub records: Vec<VarianceRecord>,
    /// Totals.
    pub summary: ReconciliationSummary,
}

/// Target vs. actual for one campaign KPI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KpiAchievement {
    /// KPI ID.
    pub kpi_id: CampaignKpiId,
    /// KPI name.
    pub kpi_type: String,
    /// Unit of measure.
    pub unit: Option<String>,
    /// Display priority.
    pub priority: i32,
    /// Target value.
    pub target_value: Decimal,
    /// Measured value.
    pub actual_value: Option<Decimal>,
    /// `actual / target`; `None` when unmeasured or the target is zero.
    pub achievement: Option<Decimal>,
    /// `actual - target`; `None` when unmeasured.
    pub variance: Option<Decimal>,
}
