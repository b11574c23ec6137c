//! Fluctuation factor data types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use yojitsu_shared::config::CalculationConfig;
use yojitsu_shared::types::{FactorId, ForecastId, YearMonth};

/// Kind of driver a factor represents.
///
/// Unknown kinds are kept as `Other` so stored data round-trips; the
/// calculation engine rejects them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FactorType {
    /// Number of employees.
    Headcount,
    /// Sales revenue.
    Revenue,
    /// Unrecognized kind.
    Other(String),
}

impl FactorType {
    /// Wire name of the type.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Headcount => "headcount",
            Self::Revenue => "revenue",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for FactorType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "headcount" => Self::Headcount,
            "revenue" => Self::Revenue,
            _ => Self::Other(s),
        }
    }
}

impl From<FactorType> for String {
    fn from(t: FactorType) -> Self {
        t.as_str().to_string()
    }
}

impl std::fmt::Display for FactorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An external driver whose monthly value moves certain budgets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FluctuationFactor {
    /// Factor ID.
    pub id: FactorId,
    /// Factor name.
    pub name: String,
    /// Factor type.
    pub factor_type: FactorType,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// Unit label for forecast values (e.g. "people", "JPY").
    #[serde(default)]
    pub unit: Option<String>,
    /// Whether the factor may drive budgets.
    pub is_active: bool,
}

/// Forecast value of a factor for one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactorForecast {
    /// Forecast row ID.
    pub id: ForecastId,
    /// Factor the forecast belongs to.
    pub factor_id: FactorId,
    /// Month.
    pub year_month: YearMonth,
    /// Forecast value.
    pub forecast_value: Decimal,
}

/// Per-unit rates applied by the calculation engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactorRates {
    /// Currency units per head.
    pub headcount_unit_price: Decimal,
    /// Fraction of revenue (0.05 = 5%).
    pub revenue_link_rate: Decimal,
}

impl FactorRates {
    /// Default currency units per head.
    pub const HEADCOUNT_UNIT_PRICE: Decimal = Decimal::from_parts(45_000, 0, 0, false, 0);
    /// Default revenue link rate (5%).
    pub const REVENUE_LINK_RATE: Decimal = Decimal::from_parts(5, 0, 0, false, 2);
}

impl Default for FactorRates {
    fn default() -> Self {
        Self {
            headcount_unit_price: Self::HEADCOUNT_UNIT_PRICE,
            revenue_link_rate: Self::REVENUE_LINK_RATE,
        }
    }
}

impl From<&CalculationConfig> for FactorRates {
    fn from(config: &CalculationConfig) -> Self {
        Self {
            headcount_unit_price: config.headcount_unit_price,
            revenue_link_rate: config.revenue_link_rate,
        }
    }
}

/// How one month's amount was derived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationDetails {
    /// Driver value the amount was computed from (the basis value or forecast).
    pub factor_value: Decimal,
    /// Rate applied per unit of the driver.
    pub basis_value: Decimal,
    /// Human-readable formula.
    pub formula_description: String,
}

/// Computed amount for one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyAmount {
    /// Month.
    pub year_month: YearMonth,
    /// Computed amount.
    pub amount: Decimal,
    /// Derivation.
    pub details: CalculationDetails,
}

/// Result of a batch factor-linked calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactorCalculation {
    /// Factor used.
    pub factor_id: FactorId,
    /// Per-month amounts in request order.
    pub monthly_amounts: Vec<MonthlyAmount>,
    /// Sum of the monthly amounts.
    pub total_amount: Decimal,
}

/// One month of a forecast grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyForecast {
    /// Calendar month (1..=12).
    pub month: u32,
    /// Month key.
    pub year_month: YearMonth,
    /// Forecast value, zero when missing.
    pub forecast_value: Decimal,
    /// True when no forecast exists for the month.
    pub is_estimated: bool,
}

/// Forecasts of one factor laid out over a fiscal year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactorForecastGrid {
    /// Factor ID.
    pub factor_id: FactorId,
    /// Factor name.
    pub factor_name: String,
    /// Unit label.
    pub unit: Option<String>,
    /// 12 slots in fiscal order.
    pub monthly_forecasts: Vec<MonthlyForecast>,
    /// Average over months that have a forecast.
    pub annual_average: Decimal,
}
