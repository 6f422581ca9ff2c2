//! Planned vs. actual reconciliation.

pub mod engine;
pub mod types;


pub use engine::ReconciliationEngine;
pub use types::{
    KpiAchievement, LineStatus, ReconciliationReport, ReconciliationSummary, VarianceRecord,
};
