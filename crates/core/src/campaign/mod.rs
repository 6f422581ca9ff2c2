//! Campaign domain records, periods, and write-time validation.

pub mod period;
pub mod types;
pub mod validation;

pub use period::{PeriodFilter, YearMonth};
pub use types::{
    BudgetLine, BudgetTeam, Campaign, CampaignKpi, CampaignTeam, Client, CreateBudgetLineInput,
    CreateCampaignInput, CreateCampaignKpiInput, CreateClientInput, CreateResultLineInput,
    LineKey, ResultLine, Team, UpdateCampaignInput,
};
pub use validation::CampaignValidator;
