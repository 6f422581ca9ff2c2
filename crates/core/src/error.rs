//! Campaign domain error types.

use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

use campaignops_shared::AppError;
use campaignops_shared::types::{BudgetLineId, CampaignId, CampaignKpiId, ClientId, TeamId};

/// Kind of record a `NotFound` error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    /// Client account.
    Client,
    /// Campaign.
    Campaign,
    /// Planned budget line.
    BudgetLine,
    /// Team.
    Team,
    /// Campaign KPI.
    Kpi,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Client => write!(f, "client"),
            Self::Campaign => write!(f, "campaign"),
            Self::BudgetLine => write!(f, "budget line"),
            Self::Team => write!(f, "team"),
            Self::Kpi => write!(f, "campaign KPI"),
        }
    }
}

/// Errors raised by allocation, reconciliation, rollup and write-time validation.
#[derive(Debug, Error)]
pub enum CampaignError {
    /// Referenced record does not exist.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Kind of record.
        entity: EntityKind,
        /// Requested identifier.
        id: Uuid,
    },

    /// Team allocations would exceed the budget line amount.
    #[error("allocation total {total} exceeds budget amount {amount}")]
    AllocationExceeded {
        /// Sum of allocations after the proposed change.
        total: Decimal,
        /// Planned amount of the budget line.
        amount: Decimal,
    },

    /// Period is malformed or ends before it starts.
    #[error("invalid period: {0}")]
    InvalidPeriod(String),

    /// Money amount cannot be negative.
    #[error("amount cannot be negative: {0}")]
    NegativeAmount(Decimal),

    /// Team allocation cannot be negative.
    #[error("allocation for team {team_id} cannot be negative: {allocation}")]
    NegativeAllocation {
        /// Team the allocation was proposed for.
        team_id: TeamId,
        /// Proposed allocation.
        allocation: Decimal,
    },

    /// The same team appears twice in one proposal.
    #[error("team {0} appears more than once in the proposed allocations")]
    DuplicateTeam(TeamId),

    /// Required client classification is blank.
    #[error("client classification is required: {0}")]
    MissingClassification(&'static str),

    /// Persistence layer failed.
    #[error("store error: {0}")]
    Store(String),
}

impl CampaignError {
    /// Create a campaign not found error.
    #[must_use]
    pub fn campaign_not_found(id: CampaignId) -> Self {
        Self::NotFound {
            entity: EntityKind::Campaign,
            id: id.into_inner(),
        }
    }

    /// Create a client not found error.
    #[must_use]
    pub fn client_not_found(id: ClientId) -> Self {
        Self::NotFound {
            entity: EntityKind::Client,
            id: id.into_inner(),
        }
    }

    /// Create a budget line not found error.
    #[must_use]
    pub fn budget_line_not_found(id: BudgetLineId) -> Self {
        Self::NotFound {
            entity: EntityKind::BudgetLine,
            id: id.into_inner(),
        }
    }

    /// Create a team not found error.
    #[must_use]
    pub fn team_not_found(id: TeamId) -> Self {
        Self::NotFound {
            entity: EntityKind::Team,
            id: id.into_inner(),
        }
    }

    /// Create a campaign KPI not found error.
    #[must_use]
    pub fn kpi_not_found(id: CampaignKpiId) -> Self {
        Self::NotFound {
            entity: EntityKind::Kpi,
            id: id.into_inner(),
        }
    }

    /// Create an invalid period error.
    #[must_use]
    pub fn invalid_period(msg: impl Into<String>) -> Self {
        Self::InvalidPeriod(msg.into())
    }

    /// Create a store error.
    #[must_use]
    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store(msg.into())
    }
}

impl From<CampaignError> for AppError {
    fn from(err: CampaignError) -> Self {
        match err {
            CampaignError::NotFound { .. } => Self::NotFound(err.to_string()),
            CampaignError::AllocationExceeded { .. } | CampaignError::DuplicateTeam(_) => {
                Self::BusinessRule(err.to_string())
            }
            CampaignError::InvalidPeriod(_)
            | CampaignError::NegativeAmount(_)
            | CampaignError::NegativeAllocation { .. }
            | CampaignError::MissingClassification(_) => Self::Validation(err.to_string()),
            CampaignError::Store(msg) => Self::Database(msg),
        }
    }
}
