//! Allocation validation.
//!
//! A budget line's team allocations must be non-negative, unique per team,
//! and sum to at most the line's planned amount. The check is pure: callers
//! pass the rows that exist today and the proposed change, and persist only
//! when validation succeeds. Sums are exact `Decimal` arithmetic, and the
//! boundary is inclusive (`total == amount` is valid).

use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::Decimal;

use campaignops_shared::types::{BudgetLineId, TeamId};

use super::types::{AllocationSummary, ProposedAllocation, TeamShare};
use crate::campaign::{BudgetLine, BudgetTeam};
use crate::error::CampaignError;

/// Validator for budget line team allocations.
pub struct AllocationValidator;

impl AllocationValidator {
    /// Validates a proposed allocation change against a budget line.
    ///
    /// Rows in `existing` that belong to other budget lines are ignored. A
    /// proposed entry for a team that already has a row replaces that row's
    /// allocation; other existing rows are kept as-is.
    ///
    /// # Errors
    ///
    /// - `CampaignError::DuplicateTeam` if a team is proposed twice
    /// - `CampaignError::NegativeAllocation` if a proposed allocation is negative
    /// - `CampaignError::AllocationExceeded` if the resulting sum exceeds the amount
    pub fn validate(
        budget: &BudgetLine,
        existing: &[BudgetTeam],
        proposed: &[ProposedAllocation],
    ) -> Result<AllocationSummary, CampaignError> {
        let mut seen = BTreeSet::new();
        for entry in proposed {
            if !seen.insert(entry.team_id) {
                return Err(CampaignError::DuplicateTeam(entry.team_id));
            }
            if entry.allocation < Decimal::ZERO {
                return Err(CampaignError::NegativeAllocation {
                    team_id: entry.team_id,
                    allocation: entry.allocation,
                });
            }
        }

        let mut shares = Self::current_shares(budget.id, existing);
        for entry in proposed {
            shares.insert(entry.team_id, entry.allocation);
        }

        Self::summarize(budget.id, budget.amount, shares)
    }

    /// Validates a change to a budget line's planned amount.
    ///
    /// Lowering the amount below what is already allocated would break the
    /// allocation invariant, so it is rejected the same way an over-allocation is.
    ///
    /// # Errors
    ///
    /// - `CampaignError::NegativeAmount` if the new amount is negative
    /// - `CampaignError::AllocationExceeded` if existing allocations exceed it
    pub fn validate_amount_change(
        budget_line_id: BudgetLineId,
        new_amount: Decimal,
        existing: &[BudgetTeam],
    ) -> Result<AllocationSummary, CampaignError> {
        if new_amount < Decimal::ZERO {
            return Err(CampaignError::NegativeAmount(new_amount));
        }

        let shares = Self::current_shares(budget_line_id, existing);
        Self::summarize(budget_line_id, new_amount, shares)
    }

    fn current_shares(
        budget_line_id: BudgetLineId,
        existing: &[BudgetTeam],
    ) -> BTreeMap<TeamId, Decimal> {
        existing
            .iter()
            .filter(|row| row.budget_line_id == budget_line_id)
            .map(|row| (row.team_id, row.allocation))
            .collect()
    }

    fn summarize(
        budget_line_id: BudgetLineId,
        amount: Decimal,
        shares: BTreeMap<TeamId, Decimal>,
    ) -> Result<AllocationSummary, CampaignError> {
        let total: Decimal = shares.values().copied().sum();

        if total > amount {
            return Err(CampaignError::AllocationExceeded { total, amount });
        }

        Ok(AllocationSummary {
            budget_line_id,
            amount,
            allocated_total: total,
            unallocated: amount - total,
            shares: shares
                .into_iter()
                .map(|(team_id, allocation)| TeamShare {
                    team_id,
                    allocation,
                })
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::campaign::YearMonth;
    use campaignops_shared::types::{BudgetTeamId, CampaignId};
    use rust_decimal_macros::dec;

    fn budget(amount: Decimal) -> BudgetLine {
        BudgetLine {
            id: BudgetLineId::new(),
            campaign_id: CampaignId::new(),
            period: YearMonth {
                year: 2026,
                month: 1,
            },
            platform: "search".to_string(),
            operation_type: "managed".to_string(),
            budget_type: "media".to_string(),
            amount,
            target_kpi: None,
            target_value: None,
        }
    }

    fn row(budget: &BudgetLine, team_id: TeamId, allocation: Decimal) -> BudgetTeam {
        BudgetTeam {
            id: BudgetTeamId::new(),
            budget_line_id: budget.id,
            team_id,
            allocation,
        }
    }

    #[test]
    fn test_over_allocation_rejected_with_both_values() {
        let line = budget(dec!(1000));
        let existing = vec![
            row(&line, TeamId::new(), dec!(600)),
            row(&line, TeamId::new(), dec!(300)),
        ];
        let proposed = [ProposedAllocation::new(TeamId::new(), dec!(150))];

        let result = AllocationValidator::validate(&line, &existing, &proposed);

        match result {
            Err(CampaignError::AllocationExceeded { total, amount }) => {
                assert_eq!(total, dec!(1050));
                assert_eq!(amount, dec!(1000));
            }
            other => panic!("expected AllocationExceeded, got {other:?}"),
        }
    }

    #[test]
    fn test_exact_boundary_allowed() {
        let line = budget(dec!(1000));
        let existing = vec![
            row(&line, TeamId::new(), dec!(600)),
            row(&line, TeamId::new(), dec!(300)),
        ];
        let proposed = [ProposedAllocation::new(TeamId::new(), dec!(100))];

        let summary = AllocationValidator::validate(&line, &existing, &proposed).unwrap();

        assert_eq!(summary.allocated_total, dec!(1000));
        assert_eq!(summary.unallocated, dec!(0));
        assert_eq!(summary.shares.len(), 3);
    }

    #[test]
    fn test_one_cent_over_rejected() {
        let line = budget(dec!(1000));
        let existing = vec![row(&line, TeamId::new(), dec!(900))];
        let proposed = [ProposedAllocation::new(TeamId::new(), dec!(100.01))];

        assert!(matches!(
            AllocationValidator::validate(&line, &existing, &proposed),
            Err(CampaignError::AllocationExceeded { .. })
        ));
    }

    #[test]
    fn test_update_replaces_existing_row() {
        let line = budget(dec!(1000));
        let team = TeamId::new();
        let existing = vec![
            row(&line, team, dec!(900)),
            row(&line, TeamId::new(), dec!(100)),
        ];
        // Lowering team's share from 900 to 500 frees room.
        let proposed = [ProposedAllocation::new(team, dec!(500))];

        let summary = AllocationValidator::validate(&line, &existing, &proposed).unwrap();

        assert_eq!(summary.allocated_total, dec!(600));
        assert_eq!(summary.unallocated, dec!(400));
    }

    #[test]
    fn test_rows_of_other_budget_lines_ignored() {
        let line = budget(dec!(100));
        let other = budget(dec!(5000));
        let existing = vec![row(&other, TeamId::new(), dec!(5000))];
        let proposed = [ProposedAllocation::new(TeamId::new(), dec!(100))];

        assert!(AllocationValidator::validate(&line, &existing, &proposed).is_ok());
    }

    #[test]
    fn test_negative_allocation_rejected() {
        let line = budget(dec!(1000));
        let proposed = [ProposedAllocation::new(TeamId::new(), dec!(-1))];

        assert!(matches!(
            AllocationValidator::validate(&line, &[], &proposed),
            Err(CampaignError::NegativeAllocation { .. })
        ));
    }

    #[test]
    fn test_duplicate_team_rejected() {
        let line = budget(dec!(1000));
        let team = TeamId::new();
        let proposed = [
            ProposedAllocation::new(team, dec!(10)),
            ProposedAllocation::new(team, dec!(20)),
        ];

        assert!(matches!(
            AllocationValidator::validate(&line, &[], &proposed),
            Err(CampaignError::DuplicateTeam(t)) if t == team
        ));
    }

    #[test]
    fn test_shares_ordered_by_team() {
        let line = budget(dec!(1000));
        let mut teams = [TeamId::new(), TeamId::new(), TeamId::new()];
        let proposed: Vec<_> = teams
            .iter()
            .rev()
            .map(|t| ProposedAllocation::new(*t, dec!(1)))
            .collect();

        let summary = AllocationValidator::validate(&line, &[], &proposed).unwrap();

        teams.sort();
        let ordered: Vec<_> = summary.shares.iter().map(|s| s.team_id).collect();
        assert_eq!(ordered, teams.to_vec());
    }

    #[test]
    fn test_amount_change_below_allocated_rejected() {
        let line = budget(dec!(1000));
        let existing = vec![row(&line, TeamId::new(), dec!(800))];

        match AllocationValidator::validate_amount_change(line.id, dec!(799.99), &existing) {
            Err(CampaignError::AllocationExceeded { total, amount }) => {
                assert_eq!(total, dec!(800));
                assert_eq!(amount, dec!(799.99));
            }
            other => panic!("expected AllocationExceeded, got {other:?}"),
        }

        assert!(AllocationValidator::validate_amount_change(line.id, dec!(800), &existing).is_ok());
        assert!(matches!(
            AllocationValidator::validate_amount_change(line.id, dec!(-5), &existing),
            Err(CampaignError::NegativeAmount(_))
        ));
    }
}
