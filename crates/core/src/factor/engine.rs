//! Factor-linked amount calculation.

use std::collections::HashMap;

use rust_decimal::Decimal;
use yojitsu_shared::types::amount::{checked_mul, checked_sum, ensure_within_range};
use yojitsu_shared::types::{FactorId, YearMonth};
use yojitsu_shared::{Measurement, SharedMonitor};

use super::error::CalculationError;
use super::types::{
    CalculationDetails, FactorCalculation, FactorForecast, FactorRates, FactorType,
    FluctuationFactor, MonthlyAmount,
};

/// Computes budget amounts from a driver value and a per-unit rate.
///
/// Pure over its inputs: nothing is read from or written to a store.
#[derive(Clone)]
pub struct CalculationEngine {
    rates: FactorRates,
    monitor: SharedMonitor,
}

impl std::fmt::Debug for CalculationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CalculationEngine")
            .field("rates", &self.rates)
            .finish_non_exhaustive()
    }
}

impl CalculationEngine {
    /// Creates an engine with the given rates.
    #[must_use]
    pub fn new(rates: FactorRates, monitor: SharedMonitor) -> Self {
        Self { rates, monitor }
    }

    /// Rates in use.
    #[must_use]
    pub const fn rates(&self) -> &FactorRates {
        &self.rates
    }

    /// Calculates the amount for a single month.
    ///
    /// # Errors
    ///
    /// Returns `InactiveFactor`, `InvalidBasisValue`, `InvalidYearMonthFormat`
    /// or `UnsupportedFactorType`, checked in that order, and `AmountOverflow`
    /// when the amount exceeds the supported range.
    pub fn calculate_amount(
        &self,
        factor: &FluctuationFactor,
        basis_value: Decimal,
        year_month: &str,
    ) -> Result<Decimal, CalculationError> {
        ensure_active(factor)?;
        ensure_positive(basis_value)?;
        parse_months(&[year_month])?;
        let rate = self.rate_for(&factor.factor_type)?;

        amount_for(basis_value, rate)
    }

    /// Calculates amounts for a list of months with one basis value.
    ///
    /// # Errors
    ///
    /// Returns `InactiveFactor`, `InvalidBasisValue`, `EmptyTargetMonths`,
    /// `InvalidYearMonthFormat` (listing every bad entry) or
    /// `UnsupportedFactorType`, checked in that order. `AmountOverflow` when a
    /// monthly amount or the total exceeds the supported range.
    pub fn calculate_budget<S: AsRef<str>>(
        &self,
        factor: &FluctuationFactor,
        basis_value: Decimal,
        target_months: &[S],
    ) -> Result<FactorCalculation, CalculationError> {
        let _m = Measurement::start(self.monitor.as_ref(), "factor.calculate_budget");

        let result = ensure_active(factor)
            .and_then(|()| ensure_positive(basis_value))
            .and_then(|()| self.validate(factor, target_months))
            .and_then(|(months, rate)| build(factor, &months, rate, |_| basis_value));

        log_outcome(factor, &result);
        result
    }

    /// Calculates amounts using each month's forecast as the basis value.
    ///
    /// # Errors
    ///
    /// Same as [`Self::calculate_budget`], plus `MissingForecast` listing the
    /// months that have no forecast, and `InvalidBasisValue` for a
    /// non-positive forecast.
    pub fn calculate_from_forecasts<S: AsRef<str>>(
        &self,
        factor: &FluctuationFactor,
        forecasts: &[FactorForecast],
        target_months: &[S],
    ) -> Result<FactorCalculation, CalculationError> {
        let _m = Measurement::start(self.monitor.as_ref(), "factor.calculate_from_forecasts");

        let result = ensure_active(factor)
            .and_then(|()| self.validate(factor, target_months))
            .and_then(|(months, rate)| {
                let values = forecast_values(&factor.id, forecasts);

                let missing: Vec<YearMonth> = months
                    .iter()
                    .filter(|ym| !values.contains_key(ym))
                    .copied()
                    .collect();
                if !missing.is_empty() {
                    return Err(CalculationError::MissingForecast {
                        factor_id: factor.id.clone(),
                        months: missing,
                    });
                }

                for ym in &months {
                    ensure_positive(values[ym])?;
                }

                build(factor, &months, rate, |ym| values[&ym])
            });

        log_outcome(factor, &result);
        result
    }

    fn validate<S: AsRef<str>>(
        &self,
        factor: &FluctuationFactor,
        target_months: &[S],
    ) -> Result<(Vec<YearMonth>, Decimal), CalculationError> {
        if target_months.is_empty() {
            return Err(CalculationError::EmptyTargetMonths);
        }
        let months = parse_months(target_months)?;
        let rate = self.rate_for(&factor.factor_type)?;
        Ok((months, rate))
    }

    fn rate_for(&self, factor_type: &FactorType) -> Result<Decimal, CalculationError> {
        match factor_type {
            FactorType::Headcount => Ok(self.rates.headcount_unit_price),
            FactorType::Revenue => Ok(self.rates.revenue_link_rate),
            FactorType::Other(name) => Err(CalculationError::UnsupportedFactorType(name.clone())),
        }
    }
}

fn build(
    factor: &FluctuationFactor,
    months: &[YearMonth],
    rate: Decimal,
    basis_for: impl Fn(YearMonth) -> Decimal,
) -> Result<FactorCalculation, CalculationError> {
    let monthly_amounts = months
        .iter()
        .map(|&year_month| -> Result<MonthlyAmount, CalculationError> {
            let basis = basis_for(year_month);
            Ok(MonthlyAmount {
                year_month,
                amount: amount_for(basis, rate)?,
                details: CalculationDetails {
                    factor_value: basis,
                    basis_value: rate,
                    formula_description: describe(&factor.factor_type, basis, rate),
                },
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let total_amount = checked_sum(monthly_amounts.iter().map(|m| m.amount))?;

    Ok(FactorCalculation {
        factor_id: factor.id.clone(),
        monthly_amounts,
        total_amount,
    })
}

/// `basis × rate`, kept within the storable amount range.
fn amount_for(basis: Decimal, rate: Decimal) -> Result<Decimal, CalculationError> {
    Ok(ensure_within_range(checked_mul(basis, rate)?)?)
}

fn ensure_active(factor: &FluctuationFactor) -> Result<(), CalculationError> {
    if factor.is_active {
        Ok(())
    } else {
        Err(CalculationError::InactiveFactor(factor.id.clone()))
    }
}

fn ensure_positive(basis_value: Decimal) -> Result<(), CalculationError> {
    if basis_value > Decimal::ZERO {
        Ok(())
    } else {
        Err(CalculationError::InvalidBasisValue(basis_value.to_string()))
    }
}

/// Parses every month key, collecting all offending entries.
fn parse_months<S: AsRef<str>>(raw: &[S]) -> Result<Vec<YearMonth>, CalculationError> {
    let mut months = Vec::with_capacity(raw.len());
    let mut invalid = Vec::new();

    for s in raw {
        match YearMonth::parse(s.as_ref()) {
            Ok(ym) => months.push(ym),
            Err(_) => invalid.push(s.as_ref().to_string()),
        }
    }

    if invalid.is_empty() {
        Ok(months)
    } else {
        Err(CalculationError::InvalidYearMonthFormat(invalid))
    }
}

/// Forecast value per month for one factor. Later rows win on duplicates.
pub(crate) fn forecast_values(
    factor_id: &FactorId,
    forecasts: &[FactorForecast],
) -> HashMap<YearMonth, Decimal> {
    forecasts
        .iter()
        .filter(|f| &f.factor_id == factor_id)
        .map(|f| (f.year_month, f.forecast_value))
        .collect()
}

fn describe(factor_type: &FactorType, basis: Decimal, rate: Decimal) -> String {
    match factor_type {
        FactorType::Headcount => {
            format!("{} heads × {}", group_thousands(basis), group_thousands(rate))
        }
        _ => match rate.checked_mul(Decimal::ONE_HUNDRED) {
            Some(percent) => format!("{} × {}%", group_thousands(basis), percent.normalize()),
            None => format!("{} × {}", group_thousands(basis), rate.normalize()),
        },
    }
}

/// Formats a decimal with comma thousands separators (`1234567.5` → `1,234,567.5`).
fn group_thousands(value: Decimal) -> String {
    let text = value.normalize().to_string();
    let (sign, unsigned) = text
        .strip_prefix('-')
        .map_or(("", text.as_str()), |rest| ("-", rest));
    let (int_part, frac_part) = unsigned
        .split_once('.')
        .map_or((unsigned, None), |(i, f)| (i, Some(f)));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}

fn log_outcome(factor: &FluctuationFactor, result: &Result<FactorCalculation, CalculationError>) {
    match result {
        Ok(calc) => tracing::info!(
            factor_id = %factor.id,
            factor_type = %factor.factor_type,
            months = calc.monthly_amounts.len(),
            total_amount = %calc.total_amount,
            "Factor-linked budget calculated"
        ),
        Err(e) => tracing::warn!(
            factor_id = %factor.id,
            error = %e,
            "Factor-linked budget calculation rejected"
        ),
    }
}
