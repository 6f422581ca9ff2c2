//! `SeaORM` entity definitions.

pub mod budget_teams;
pub mod budgets;
pub mod campaign_kpis;
pub mod campaign_teams;
pub mod campaigns;
pub mod clients;
pub mod results;
pub mod teams;
