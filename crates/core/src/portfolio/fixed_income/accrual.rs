use chrono::NaiveDate;
use log::debug;
use num_traits::ToPrimitive;
use rust_decimal::{Decimal, MathematicalOps};
use serde::Serialize;

use super::FixedIncomePosition;
use crate::assets::AssetClass;
use crate::config::EngineConfig;
use crate::constants::DECIMAL_PRECISION;
use crate::errors::{Result, ValidationError};
use crate::portfolio::holdings::{Holding, PriceSource};
use crate::utils::time_utils::elapsed_days;

/// Accrued state of a fixed-income position on a valuation date.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccrualResult {
    pub elapsed_days: i64,
    pub years: Decimal,
    pub interest: Decimal,
    pub current_value: Decimal,
    /// Interest earned per day; zero once matured.
    pub daily_accrual: Decimal,
    pub matured: bool,
}

/// Accrues interest from the start date to `as_of` (capped at maturity).
pub fn accrue(
    position: &FixedIncomePosition,
    as_of: NaiveDate,
    config: &EngineConfig,
) -> Result<AccrualResult> {
    position.validate()?;

    let days = elapsed_days(position.start_date, position.accrual_end(as_of));
    let years = Decimal::from(days)
        .checked_div(config.elapsed_days_per_year)
        .ok_or_else(|| {
            ValidationError::InvalidInput(format!(
                "Cannot convert {} days to years with {} days per year",
                days, config.elapsed_days_per_year
            ))
        })?;

    let out_of_range = || {
        ValidationError::InvalidInput(format!(
            "Interest for '{}' is out of range ({} compounding over {} years)",
            position.name, position.compounding, years
        ))
    };

    let current_value = match position.compounding.periods_per_year() {
        None => position
            .principal
            .checked_mul(position.annual_rate)
            .and_then(|yearly| yearly.checked_mul(years))
            .and_then(|interest| interest.checked_add(position.principal)),
        Some(periods) => compound_growth(position.annual_rate, periods, years)
            .and_then(|growth| position.principal.checked_mul(growth)),
    }
    .ok_or_else(out_of_range)?
    .round_dp(DECIMAL_PRECISION);

    let matured = position.is_matured(as_of);
    let daily_accrual = if !matured && as_of >= position.start_date {
        position
            .principal
            .checked_mul(position.annual_rate)
            .and_then(|yearly| yearly.checked_div(config.accrual_days_per_year))
            .ok_or_else(out_of_range)?
            .round_dp(DECIMAL_PRECISION)
    } else {
        Decimal::ZERO
    };

    debug!(
        "Accrued {} over {} days ({}): value {}",
        position.name, days, position.compounding, current_value
    );

    Ok(AccrualResult {
        elapsed_days: days,
        years,
        interest: current_value - position.principal,
        current_value,
        daily_accrual,
        matured,
    })
}

/// `(1 + rate / periods) ^ (periods * years)`.
///
/// The whole part of the exponent uses exact repeated multiplication; only
/// the fractional remainder goes through the logarithmic power.
fn compound_growth(annual_rate: Decimal, periods: u32, years: Decimal) -> Option<Decimal> {
    if annual_rate.is_zero() || years.is_zero() {
        return Some(Decimal::ONE);
    }
    let periods = Decimal::from(periods);
    let base = annual_rate.checked_div(periods)?.checked_add(Decimal::ONE)?;
    let exponent = periods * years;

    let whole = exponent.trunc();
    let fraction = exponent - whole;

    let whole_growth = base.checked_powu(whole.to_u64()?)?;
    let fractional_growth = if fraction.is_zero() {
        Decimal::ONE
    } else {
        base.checked_powd(fraction)?
    };
    whole_growth.checked_mul(fractional_growth)
}

/// Turns a fixed-income position into a synthetic single-unit holding.
///
/// The principal is the average cost and the accrued value the spot price;
/// the previous close is one daily accrual earlier.
pub fn value_fixed_income(
    position: &FixedIncomePosition,
    as_of: NaiveDate,
    config: &EngineConfig,
) -> Result<Holding> {
    let accrual = accrue(position, as_of, config)?;
    let previous_close = accrual.current_value - accrual.daily_accrual;

    Ok(Holding {
        instrument_key: position.name.trim().to_string(),
        asset_class: AssetClass::FixedIncome,
        price_source: PriceSource::Accrual,
        quantity_held: Decimal::ONE,
        average_cost: position.principal,
        spot_price: accrual.current_value,
        previous_close: Some(previous_close),
        market_value: accrual.current_value,
        unrealized_gain: accrual.interest,
        realized_gain: Decimal::ZERO,
        day_gain: Some(accrual.daily_accrual),
    })
}
