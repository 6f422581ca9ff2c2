//! Database layer with `SeaORM` entities and repositories.
//!
//! This crate provides:
//! - `SeaORM` entity definitions
//! - Schema bootstrap from those entities
//! - `SeaCampaignStore`, the `PostgreSQL` implementation of `CampaignStore`
//! - Repositories for validated and serialized writes

pub mod entities;
pub mod error;
pub mod repositories;
pub mod schema;

pub use error::StoreError;
pub use repositories::{AllocationRepository, CampaignRepository, SeaCampaignStore};
pub use schema::create_schema;

use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};

use campaignops_shared::DatabaseConfig;

/// Establishes a pooled connection to the database.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(config.url.clone());
    options
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(Duration::from_secs(10))
        .sqlx_logging(false);

    Database::connect(options).await
}
