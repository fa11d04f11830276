use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::decimal::{Money, Rate};
use crate::errors::{InvestmentError, Result};

/// validated body of a return projection request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionRequest {
    pub initial_investment: Money,
    #[serde(default)]
    pub monthly_contribution: Money,
    /// expected annual return in percent
    pub expected_return: Decimal,
    pub years: u32,
}

impl ProjectionRequest {
    pub fn validate(&self) -> Result<()> {
        if self.initial_investment.is_zero() {
            return Err(InvestmentError::MissingProjectionInput { field: "initialInvestment" });
        }
        if self.expected_return.is_zero() {
            return Err(InvestmentError::MissingProjectionInput { field: "expectedReturn" });
        }
        if self.years == 0 {
            return Err(InvestmentError::MissingProjectionInput { field: "years" });
        }
        for amount in [self.initial_investment, self.monthly_contribution] {
            if amount.is_negative() {
                return Err(InvestmentError::NegativeAmount { amount });
            }
        }
        Ok(())
    }
}

/// projected outcome of monthly-compounded saving
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReturnProjection {
    pub total_investment: Money,
    pub total_return: Money,
    pub final_amount: Money,
    /// monthly rate in percent
    pub monthly_rate: Decimal,
}

/// project an initial deposit plus monthly contributions, compounded monthly
///
/// Horizons whose amounts leave the decimal range fail with
/// `ProjectionOverflow` instead of saturating.
pub fn project_returns(request: &ProjectionRequest) -> Result<ReturnProjection> {
    request.validate()?;

    let overflow = || InvestmentError::ProjectionOverflow { years: request.years };
    let monthly_rate = Rate::from_percent_decimal(request.expected_return).monthly_rate();
    let months = request.years.checked_mul(12).ok_or_else(overflow)?;
    let r = monthly_rate.as_decimal();
    let periods = Decimal::from(months);

    let compound_factor = monthly_rate.compound_factor(months).ok_or_else(overflow)?;
    let initial = request.initial_investment.as_decimal();
    let contribution = request.monthly_contribution.as_decimal();

    let future_initial = initial.checked_mul(compound_factor).ok_or_else(overflow)?;
    let future_contributions = if r.is_zero() {
        contribution.checked_mul(periods)
    } else {
        compound_factor
            .checked_sub(Decimal::ONE)
            .and_then(|growth| growth.checked_div(r))
            .and_then(|annuity| contribution.checked_mul(annuity))
    }
    .ok_or_else(overflow)?;

    let total_investment = contribution
        .checked_mul(periods)
        .and_then(|paid| initial.checked_add(paid))
        .ok_or_else(overflow)?;
    let final_amount = future_initial.checked_add(future_contributions).ok_or_else(overflow)?;
    let total_return = final_amount.checked_sub(total_investment).ok_or_else(overflow)?;

    debug!(months, %final_amount, "projected returns");

    Ok(ReturnProjection {
        total_investment: Money::from_decimal(total_investment),
        total_return: Money::from_decimal(total_return),
        final_amount: Money::from_decimal(final_amount),
        monthly_rate: monthly_rate.as_decimal() * dec!(100),
    })
}
