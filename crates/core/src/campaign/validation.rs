//! Write-time validation for campaign records.

use rust_decimal::Decimal;

use super::period::YearMonth;
use super::types::{
    CreateBudgetLineInput, CreateCampaignInput, CreateClientInput, CreateResultLineInput,
    UpdateCampaignInput,
};
use crate::error::CampaignError;

/// Validation rules applied before records are persisted.
pub struct CampaignValidator;

impl CampaignValidator {
    /// Validate client creation.
    ///
    /// # Errors
    ///
    /// Returns `CampaignError::MissingClassification` if the business division
    /// or sales department is blank.
    pub fn validate_client(input: &CreateClientInput) -> Result<(), CampaignError> {
        if input.business_division.trim().is_empty() {
            return Err(CampaignError::MissingClassification("business_division"));
        }
        if input.sales_department.trim().is_empty() {
            return Err(CampaignError::MissingClassification("sales_department"));
        }
        Ok(())
    }

    /// Validate campaign creation.
    ///
    /// # Errors
    ///
    /// Returns `CampaignError::NegativeAmount` for a negative total budget and
    /// `CampaignError::InvalidPeriod` if a period is malformed or the end
    /// precedes the start.
    pub fn validate_campaign(input: &CreateCampaignInput) -> Result<(), CampaignError> {
        check_campaign(input.total_budget, input.start, input.end)
    }

    /// Validate a campaign update.
    ///
    /// # Errors
    ///
    /// Same rules as [`Self::validate_campaign`].
    pub fn validate_campaign_update(input: &UpdateCampaignInput) -> Result<(), CampaignError> {
        check_campaign(input.total_budget, input.start, input.end)
    }

    /// Validate budget line creation.
    ///
    /// # Errors
    ///
    /// Returns `CampaignError::NegativeAmount` if the amount is negative and
    /// `CampaignError::InvalidPeriod` if the month is out of range.
    pub fn validate_budget_line(input: &CreateBudgetLineInput) -> Result<(), CampaignError> {
        if input.amount < Decimal::ZERO {
            return Err(CampaignError::NegativeAmount(input.amount));
        }
        input.period.validate()
    }

    /// Validate result line creation.
    ///
    /// # Errors
    ///
    /// Returns `CampaignError::InvalidPeriod` if the month is out of range.
    pub fn validate_result_line(input: &CreateResultLineInput) -> Result<(), CampaignError> {
        input.period.validate()
    }
}

fn check_campaign(
    total_budget: Decimal,
    start: YearMonth,
    end: Option<YearMonth>,
) -> Result<(), CampaignError> {
    if total_budget < Decimal::ZERO {
        return Err(CampaignError::NegativeAmount(total_budget));
    }

    start.validate()?;

    if let Some(end) = end {
        end.validate()?;
        if end < start {
            return Err(CampaignError::invalid_period(format!(
                "end {end} precedes start {start}"
            )));
        }
    }

    Ok(())
}
