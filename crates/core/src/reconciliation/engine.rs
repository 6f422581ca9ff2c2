//! Budget vs. result and KPI reconciliation.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use campaignops_shared::types::{BudgetLineId, CampaignId, ResultLineId};

use super::types::{
    KpiAchievement, LineStatus, ReconciliationReport, ReconciliationSummary, VarianceRecord,
};
use crate::campaign::{BudgetLine, CampaignKpi, LineKey, PeriodFilter, ResultLine};

/// Decimal places kept for percentages.
pub const PERCENT_SCALE: u32 = 2;

#[derive(Default)]
struct Group {
    planned: Decimal,
    target: Option<Decimal>,
    budget_line_ids: Vec<BudgetLineId>,
    actual_spend: Decimal,
    actual_result: Decimal,
    result_line_ids: Vec<ResultLineId>,
}

impl Group {
    fn status(&self) -> LineStatus {
        match (
            self.budget_line_ids.is_empty(),
            self.result_line_ids.is_empty(),
        ) {
            (false, false) => LineStatus::Matched,
            (false, true) => LineStatus::OrphanBudget,
            // A group only exists if at least one side contributed a row.
            _ => LineStatus::OrphanResult,
        }
    }

    fn into_record(self, key: LineKey) -> VarianceRecord {
        let status = self.status();
        VarianceRecord {
            key,
            planned_amount: self.planned,
            actual_spend: self.actual_spend,
            spend_variance: self.actual_spend - self.planned,
            utilization_percent: percent_of(self.actual_spend, self.planned),
            target_value: self.target,
            actual_result: self.actual_result,
            result_variance: self.target.map(|t| self.actual_result - t),
            status,
            budget_line_ids: self.budget_line_ids,
            result_line_ids: self.result_line_ids,
        }
    }
}

/// Reconciliation of planned figures against actuals.
pub struct ReconciliationEngine;

impl ReconciliationEngine {
    /// Groups budget and result lines by key and computes per-group variance.
    ///
    /// Lines outside `filter` are skipped. Rows sharing a key on the same side
    /// are summed. Records come out in key order (year, month, platform,
    /// operation type, budget type), so identical inputs always produce an
    /// identical report.
    #[must_use]
    pub fn reconcile(
        campaign_id: CampaignId,
        budgets: &[BudgetLine],
        results: &[ResultLine],
        filter: &PeriodFilter,
    ) -> ReconciliationReport {
        let mut groups: BTreeMap<LineKey, Group> = BTreeMap::new();

        for line in budgets.iter().filter(|b| b.campaign_id == campaign_id) {
            let key = line.key();
            if !filter.matches(&key) {
                continue;
            }
            let group = groups.entry(key).or_default();
            group.planned += line.amount;
            if let Some(target) = line.target_value {
                group.target = Some(group.target.unwrap_or(Decimal::ZERO) + target);
            }
            group.budget_line_ids.push(line.id);
        }

        for line in results.iter().filter(|r| r.campaign_id == campaign_id) {
            let key = line.key();
            if !filter.matches(&key) {
                continue;
            }
            let group = groups.entry(key).or_default();
            group.actual_spend += line.actual_spend;
            group.actual_result += line.actual_result;
            group.result_line_ids.push(line.id);
        }

        let records: Vec<VarianceRecord> = groups
            .into_iter()
            .map(|(key, group)| group.into_record(key))
            .collect();

        let summary = Self::summarize(&records);

        ReconciliationReport {
            campaign_id,
            filter: filter.clone(),
            records,
            summary,
        }
    }

    /// Computes achievement for each KPI, ordered by priority then KPI type.
    #[must_use]
    pub fn reconcile_kpis(kpis: &[CampaignKpi]) -> Vec<KpiAchievement> {
        let mut ordered: Vec<&CampaignKpi> = kpis.iter().collect();
        ordered.sort_by(|a, b| {
            a.priority
                .cmp(&b.priority)
                .then_with(|| a.kpi_type.cmp(&b.kpi_type))
                .then_with(|| a.id.cmp(&b.id))
        });

        ordered
            .into_iter()
            .map(|kpi| KpiAchievement {
                kpi_id: kpi.id,
                kpi_type: kpi.kpi_type.clone(),
                unit: kpi.unit.clone(),
                priority: kpi.priority,
                target_value: kpi.target_value,
                actual_value: kpi.actual_value,
                achievement: Self::achievement(kpi.target_value, kpi.actual_value),
                variance: kpi.actual_value.map(|a| a - kpi.target_value),
            })
            .collect()
    }

    /// Ratio of actual to target.
    ///
    /// Returns `None` rather than zero when the KPI has not been measured, the
    /// target is zero, or the ratio does not fit in a `Decimal`.
    #[must_use]
    pub fn achievement(target: Decimal, actual: Option<Decimal>) -> Option<Decimal> {
        let actual = actual?;
        if target.is_zero() {
            return None;
        }
        actual.checked_div(target)
    }

    fn summarize(records: &[VarianceRecord]) -> ReconciliationSummary {
        let mut summary = ReconciliationSummary::default();
        for record in records {
            summary.planned_total += record.planned_amount;
            summary.actual_spend_total += record.actual_spend;
            match record.status {
                LineStatus::Matched => summary.matched += 1,
                LineStatus::OrphanBudget => summary.orphan_budgets += 1,
                LineStatus::OrphanResult => summary.orphan_results += 1,
            }
        }
        summary.spend_variance_total = summary.actual_spend_total - summary.planned_total;
        summary
    }
}

/// `part / whole * 100` rounded to [`PERCENT_SCALE`]; `None` for a zero whole
/// or a result outside the `Decimal` range.
#[must_use]
pub fn percent_of(part: Decimal, whole: Decimal) -> Option<Decimal> {
    if whole.is_zero() {
        return None;
    }
    part.checked_div(whole)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .map(|pct| pct.round_dp(PERCENT_SCALE))
}
