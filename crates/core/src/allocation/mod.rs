//! Team allocations against budget lines.

pub mod types;
pub mod validator;

#[cfg(test)]
mod props;

pub use types::{AllocationSummary, ProposedAllocation, TeamShare};
pub use validator::AllocationValidator;
