//! Property-based tests for allocation validation.
//!
//! - Sum invariant: a successful validation never leaves more allocated than planned
//! - Rejection: any proposal whose resulting sum exceeds the amount fails

use proptest::prelude::*;
use rust_decimal::Decimal;

use campaignops_shared::types::{BudgetLineId, BudgetTeamId, CampaignId, TeamId};

use super::types::ProposedAllocation;
use super::validator::AllocationValidator;
use crate::campaign::{BudgetLine, BudgetTeam, YearMonth};
use crate::error::CampaignError;

/// Strategy for cent amounts between 0.00 and 10,000.00.
fn cents() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000i64).prop_map(|c| Decimal::new(c, 2))
}

fn budget_line(amount: Decimal) -> BudgetLine {
    BudgetLine {
        id: BudgetLineId::new(),
        campaign_id: CampaignId::new(),
        period: YearMonth {
            year: 2026,
            month: 6,
        },
        platform: "display".to_string(),
        operation_type: "managed".to_string(),
        budget_type: "media".to_string(),
        amount,
        target_kpi: None,
        target_value: None,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// *For any* amount, existing rows and new team allocations, validation
    /// succeeds exactly when the resulting sum is within the amount.
    #[test]
    fn prop_sum_never_exceeds_amount(
        amount in cents(),
        existing in prop::collection::vec(cents(), 0..6),
        proposed in prop::collection::vec(cents(), 0..6),
    ) {
        let line = budget_line(amount);
        let rows: Vec<BudgetTeam> = existing
            .iter()
            .map(|a| BudgetTeam {
                id: BudgetTeamId::new(),
                budget_line_id: line.id,
                team_id: TeamId::new(),
                allocation: *a,
            })
            .collect();
        let proposals: Vec<ProposedAllocation> = proposed
            .iter()
            .map(|a| ProposedAllocation::new(TeamId::new(), *a))
            .collect();

        let expected_total: Decimal =
            existing.iter().copied().sum::<Decimal>() + proposed.iter().copied().sum::<Decimal>();

        match AllocationValidator::validate(&line, &rows, &proposals) {
            Ok(summary) => {
                prop_assert!(expected_total <= amount);
                prop_assert_eq!(summary.allocated_total, expected_total);
                prop_assert_eq!(summary.allocated_total + summary.unallocated, amount);
            }
            Err(CampaignError::AllocationExceeded { total, amount: reported }) => {
                prop_assert!(expected_total > amount);
                prop_assert_eq!(total, expected_total);
                prop_assert_eq!(reported, amount);
            }
            Err(other) => prop_assert!(false, "unexpected error: {other}"),
        }
    }

    /// *For any* amount, filling it exactly succeeds and one cent more fails.
    #[test]
    fn prop_boundary_is_inclusive(amount in cents()) {
        let line = budget_line(amount);
        let team = TeamId::new();

        let exact = [ProposedAllocation::new(team, amount)];
        prop_assert!(AllocationValidator::validate(&line, &[], &exact).is_ok());

        let over = [ProposedAllocation::new(team, amount + Decimal::new(1, 2))];
        let is_exceeded = matches!(
            AllocationValidator::validate(&line, &[], &over),
            Err(CampaignError::AllocationExceeded { .. })
        );
        prop_assert!(is_exceeded);
    }
}
