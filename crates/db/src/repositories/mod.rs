//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod allocation;
pub mod campaign;
mod convert;
pub mod store;

pub use allocation::AllocationRepository;
pub use campaign::CampaignRepository;
pub use store::SeaCampaignStore;
