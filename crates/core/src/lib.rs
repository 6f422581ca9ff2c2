//! Core business logic for campaignops.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `campaign` - Domain records, periods, and write-time validation
//! - `allocation` - Team allocations against budget lines
//! - `reconciliation` - Planned vs. actual variance and KPI achievement
//! - `rollup` - Campaign-level totals for dashboards
//! - `store` - Persistence seam implemented by the db crate
//! - `service` - Caller-facing operations over a store

pub mod allocation;
pub mod campaign;
pub mod error;
pub mod reconciliation;
pub mod rollup;
pub mod service;
pub mod store;

pub use error::{CampaignError, EntityKind};
pub use service::CampaignAnalytics;
pub use store::CampaignStore;
