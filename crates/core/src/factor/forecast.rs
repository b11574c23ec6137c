//! Forecast grid for a factor over a fiscal year.

use rust_decimal::Decimal;
use yojitsu_shared::types::FiscalYear;
use yojitsu_shared::types::amount::{checked_div, checked_sum};

use super::engine::forecast_values;
use super::error::CalculationError;
use super::types::{FactorForecast, FactorForecastGrid, FluctuationFactor, MonthlyForecast};

/// Lays a factor's forecasts out over the 12 months of a fiscal year.
///
/// Months without a forecast are zero and flagged `is_estimated`. The annual
/// average only counts months that have a forecast.
///
/// # Errors
///
/// Returns `AmountOverflow` when the forecasts cannot be averaged.
pub fn forecast_grid(
    factor: &FluctuationFactor,
    forecasts: &[FactorForecast],
    fiscal_year: &FiscalYear,
) -> Result<FactorForecastGrid, CalculationError> {
    let values = forecast_values(&factor.id, forecasts);

    let monthly_forecasts: Vec<MonthlyForecast> = fiscal_year
        .months()
        .into_iter()
        .map(|year_month| {
            let value = values.get(&year_month).copied();
            MonthlyForecast {
                month: year_month.month(),
                year_month,
                forecast_value: value.unwrap_or(Decimal::ZERO),
                is_estimated: value.is_none(),
            }
        })
        .collect();

    let present: Vec<Decimal> = monthly_forecasts
        .iter()
        .filter(|m| !m.is_estimated)
        .map(|m| m.forecast_value)
        .collect();
    let annual_average = if present.is_empty() {
        Decimal::ZERO
    } else {
        checked_div(checked_sum(present.iter().copied())?, Decimal::from(present.len()))?
            .round_dp(2)
    };

    Ok(FactorForecastGrid {
        factor_id: factor.id.clone(),
        factor_name: factor.name.clone(),
        unit: factor.unit.clone(),
        monthly_forecasts,
        annual_average,
    })
}
