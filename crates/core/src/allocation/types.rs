//! Allocation data types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use campaignops_shared::types::{BudgetLineId, TeamId};

/// A requested allocation of budget to a team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposedAllocation {
    /// Receiving team.
    pub team_id: TeamId,
    /// Amount to allocate.
    pub allocation: Decimal,
}

impl ProposedAllocation {
    /// Creates a proposed allocation.
    #[must_use]
    pub const fn new(team_id: TeamId, allocation: Decimal) -> Self {
        Self {
            team_id,
            allocation,
        }
    }
}

/// One team's share after the proposal is applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamShare {
    /// Team.
    pub team_id: TeamId,
    /// Allocated amount.
    pub allocation: Decimal,
}

/// Outcome of a successful allocation validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationSummary {
    /// Budget line being allocated.
    pub budget_line_id: BudgetLineId,
    /// Planned amount of the budget line.
    pub amount: Decimal,
    /// Sum of all allocations after the change.
    pub allocated_total: Decimal,
    /// `amount - allocated_total`; never negative.
    pub unallocated: Decimal,
    /// Resulting allocations, ordered by team ID.
    pub shares: Vec<TeamShare>,
}
