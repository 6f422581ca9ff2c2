//! Calendar periods for campaigns and budget/result lines.

use serde::{Deserialize, Serialize};

use super::types::LineKey;
use crate::error::CampaignError;

/// A calendar month, ordered chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct YearMonth {
    /// Calendar year.
    pub year: i32,
    /// Month of the year (1-12).
    pub month: u32,
}

impl YearMonth {
    /// Creates a validated period.
    ///
    /// # Errors
    ///
    /// Returns `CampaignError::InvalidPeriod` if the month is outside 1..=12.
    pub fn new(year: i32, month: u32) -> Result<Self, CampaignError> {
        let period = Self { year, month };
        period.validate()?;
        Ok(period)
    }

    /// Checks that the month is within 1..=12.
    ///
    /// # Errors
    ///
    /// Returns `CampaignError::InvalidPeriod` if the month is out of range.
    pub fn validate(&self) -> Result<(), CampaignError> {
        validate_month(self.month)
    }

    /// Builds an optional period from nullable year/month columns.
    ///
    /// Both parts absent means "no period"; exactly one present is malformed.
    ///
    /// # Errors
    ///
    /// Returns `CampaignError::InvalidPeriod` if only one part is present,
    /// or the month is out of range.
    pub fn from_parts(year: Option<i32>, month: Option<i32>) -> Result<Option<Self>, CampaignError> {
        match (year, month) {
            (None, None) => Ok(None),
            (Some(year), Some(month)) => {
                let month = u32::try_from(month)
                    .map_err(|_| CampaignError::invalid_period(format!("month {month} is out of range")))?;
                Self::new(year, month).map(Some)
            }
            _ => Err(CampaignError::invalid_period(
                "year and month must both be present or both absent",
            )),
        }
    }
}

impl std::fmt::Display for YearMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

fn validate_month(month: u32) -> Result<(), CampaignError> {
    if (1..=12).contains(&month) {
        Ok(())
    } else {
        Err(CampaignError::invalid_period(format!(
            "month {month} is out of range"
        )))
    }
}

/// Optional scope for reconciliation queries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodFilter {
    /// Restrict to one calendar year.
    pub year: Option<i32>,
    /// Restrict to one month (of any year unless `year` is also set).
    pub month: Option<u32>,
    /// Restrict to one platform.
    pub platform: Option<String>,
}

impl PeriodFilter {
    /// A filter that matches every line.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Checks that the month, if any, is within 1..=12.
    ///
    /// # Errors
    ///
    /// Returns `CampaignError::InvalidPeriod` for an out-of-range month.
    pub fn validate(&self) -> Result<(), CampaignError> {
        self.month.map_or(Ok(()), validate_month)
    }

    /// Returns true if a line with this key is in scope.
    #[must_use]
    pub fn matches(&self, key: &LineKey) -> bool {
        self.year.is_none_or(|y| y == key.period.year)
            && self.month.is_none_or(|m| m == key.period.month)
            && self
                .platform
                .as_deref()
                .is_none_or(|p| p == key.platform)
    }
}
