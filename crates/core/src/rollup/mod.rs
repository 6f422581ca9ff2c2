//! Campaign-level rollups for dashboards.

pub mod service;
pub mod types;


pub use service::RollupService;
pub use types::{CampaignRollup, TeamAllocationTotal, TeamParticipation};
