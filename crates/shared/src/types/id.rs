//! Typed IDs for type-safe entity references.
//!
//! Using typed IDs prevents accidentally passing a `TeamId` where a `CampaignId` is expected.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Macro to generate typed ID wrappers.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Creates a new random ID using UUID v7 (time-ordered).
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Creates an ID from an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the inner UUID.
            #[must_use]
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

typed_id!(UserId, "Unique identifier for a user (client manager).");
typed_id!(ClientId, "Unique identifier for a client account.");
typed_id!(CampaignId, "Unique identifier for a campaign.");
typed_id!(BudgetLineId, "Unique identifier for a planned budget line.");
typed_id!(ResultLineId, "Unique identifier for an actual result line.");
typed_id!(TeamId, "Unique identifier for a team.");
typed_id!(
    BudgetTeamId,
    "Unique identifier for a team allocation against a budget line."
);
typed_id!(
    CampaignTeamId,
    "Unique identifier for a team's participation in a campaign."
);
typed_id!(CampaignKpiId, "Unique identifier for a campaign KPI.");

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
