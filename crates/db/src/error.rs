//! Error type for the database layer.

use sea_orm::DbErr;
use thiserror::Error;

use campaignops_core::CampaignError;
use campaignops_shared::AppError;

/// Errors raised by repositories and the `SeaORM` campaign store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A domain rule rejected the write.
    #[error(transparent)]
    Domain(#[from] CampaignError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    /// A unique constraint rejected the write.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// A stored row cannot be mapped to a domain record.
    #[error("Corrupt row: {0}")]
    Corrupt(String),
}

impl From<StoreError> for CampaignError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Domain(e) => e,
            other => Self::store(other.to_string()),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Domain(e) => e.into(),
            StoreError::Conflict(msg) => Self::Conflict(msg),
            StoreError::Database(e) => Self::Database(e.to_string()),
            StoreError::Corrupt(msg) => Self::Internal(msg),
        }
    }
}
