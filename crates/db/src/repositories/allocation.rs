//! Serialized team allocation writes.
//!
//! Every write locks the budget row (`SELECT ... FOR UPDATE`) inside a
//! transaction, re-reads the allocations under the lock and runs the core
//! validator before touching `budget_teams`. Two writers for the same budget
//! line therefore cannot both pass validation.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    QueryFilter, QuerySelect, Set, TransactionTrait,
};
use std::collections::HashSet;
use tracing::{info, warn};

use campaignops_core::CampaignError;
use campaignops_core::allocation::{AllocationSummary, AllocationValidator, ProposedAllocation};
use campaignops_core::campaign::{BudgetLine, BudgetTeam};
use campaignops_shared::types::{BudgetLineId, BudgetTeamId, TeamId};

use super::convert;
use crate::entities::{budget_teams, budgets, teams};
use crate::error::StoreError;

/// Repository for budget line allocations.
#[derive(Debug, Clone)]
pub struct AllocationRepository {
    db: DatabaseConnection,
}

impl AllocationRepository {
    /// Creates a new allocation repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Validates and persists team allocations for a budget line.
    ///
    /// A proposed entry for a team that already holds an allocation replaces
    /// it; teams not mentioned keep their current allocation.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The budget line or a proposed team does not exist
    /// - The proposal is invalid or would over-allocate the line
    /// - Database operation fails
    pub async fn apply_allocations(
        &self,
        budget_line_id: BudgetLineId,
        proposed: &[ProposedAllocation],
    ) -> Result<AllocationSummary, StoreError> {
        let txn = self.db.begin().await?;

        let budget = lock_budget_line(&txn, budget_line_id).await?;
        ensure_teams_exist(&txn, proposed).await?;

        let rows = allocation_rows(&txn, budget_line_id).await?;
        let existing: Vec<BudgetTeam> = rows.iter().cloned().map(convert::budget_team).collect();

        let summary = match AllocationValidator::validate(&budget, &existing, proposed) {
            Ok(summary) => summary,
            Err(e) => {
                warn!(budget_id = %budget_line_id, error = %e, "allocation rejected");
                return Err(e.into());
            }
        };

        let now: DateTimeWithTimeZone = Utc::now().into();
        for entry in proposed {
            let team_uuid = entry.team_id.into_inner();
            if let Some(row) = rows.iter().find(|r| r.team_id == team_uuid) {
                let mut active: budget_teams::ActiveModel = row.clone().into();
                active.allocation = Set(entry.allocation);
                active.updated_at = Set(now);
                active.update(&txn).await?;
            } else {
                budget_teams::ActiveModel {
                    id: Set(BudgetTeamId::new().into_inner()),
                    budget_id: Set(budget_line_id.into_inner()),
                    team_id: Set(team_uuid),
                    allocation: Set(entry.allocation),
                    created_at: Set(now),
                    updated_at: Set(now),
                }
                .insert(&txn)
                .await?;
            }
        }

        txn.commit().await?;

        info!(
            budget_id = %budget_line_id,
            teams = proposed.len(),
            allocated_total = %summary.allocated_total,
            unallocated = %summary.unallocated,
            "team allocations applied"
        );
        Ok(summary)
    }

    /// Changes a budget line's planned amount.
    ///
    /// The amount may not drop below what is already allocated to teams.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The budget line does not exist
    /// - The amount is negative or below the allocated total
    /// - Database operation fails
    pub async fn update_budget_amount(
        &self,
        budget_line_id: BudgetLineId,
        amount: Decimal,
    ) -> Result<AllocationSummary, StoreError> {
        let txn = self.db.begin().await?;

        lock_budget_line(&txn, budget_line_id).await?;
        let existing: Vec<BudgetTeam> = allocation_rows(&txn, budget_line_id)
            .await?
            .into_iter()
            .map(convert::budget_team)
            .collect();

        let summary = AllocationValidator::validate_amount_change(budget_line_id, amount, &existing)?;

        budgets::ActiveModel {
            id: Set(budget_line_id.into_inner()),
            amount: Set(amount),
            updated_at: Set(Utc::now().into()),
            ..Default::default()
        }
        .update(&txn)
        .await?;

        txn.commit().await?;

        info!(budget_id = %budget_line_id, amount = %amount, "budget amount updated");
        Ok(summary)
    }

    /// Removes a team's allocation from a budget line.
    ///
    /// Returns `false` if the team held no allocation.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn remove_allocation(
        &self,
        budget_line_id: BudgetLineId,
        team_id: TeamId,
    ) -> Result<bool, StoreError> {
        let result = budget_teams::Entity::delete_many()
            .filter(budget_teams::Column::BudgetId.eq(budget_line_id.into_inner()))
            .filter(budget_teams::Column::TeamId.eq(team_id.into_inner()))
            .exec(&self.db)
            .await?;

        if result.rows_affected > 0 {
            info!(budget_id = %budget_line_id, team_id = %team_id, "team allocation removed");
        }
        Ok(result.rows_affected > 0)
    }
}

async fn lock_budget_line(
    txn: &DatabaseTransaction,
    id: BudgetLineId,
) -> Result<BudgetLine, StoreError> {
    let model = budgets::Entity::find_by_id(id.into_inner())
        .lock_exclusive()
        .one(txn)
        .await?
        .ok_or_else(|| CampaignError::budget_line_not_found(id))?;
    convert::budget_line(model)
}

async fn allocation_rows(
    txn: &DatabaseTransaction,
    id: BudgetLineId,
) -> Result<Vec<budget_teams::Model>, StoreError> {
    Ok(budget_teams::Entity::find()
        .filter(budget_teams::Column::BudgetId.eq(id.into_inner()))
        .all(txn)
        .await?)
}

async fn ensure_teams_exist(
    txn: &DatabaseTransaction,
    proposed: &[ProposedAllocation],
) -> Result<(), StoreError> {
    if proposed.is_empty() {
        return Ok(());
    }

    let known: HashSet<_> = teams::Entity::find()
        .filter(teams::Column::Id.is_in(proposed.iter().map(|p| p.team_id.into_inner())))
        .all(txn)
        .await?
        .into_iter()
        .map(|t| t.id)
        .collect();

    match proposed.iter().find(|p| !known.contains(&p.team_id.into_inner())) {
        Some(missing) => Err(CampaignError::team_not_found(missing.team_id).into()),
        None => Ok(()),
    }
}
