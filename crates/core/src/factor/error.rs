//! Calculation error types.

use thiserror::Error;
use yojitsu_shared::AppError;
use yojitsu_shared::types::{AmountOverflow, FactorId, YearMonth};

/// Factor-linked calculation errors.
///
/// All but `AmountOverflow` are raised before any amount is computed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalculationError {
    /// Factor is disabled.
    #[error("Factor is inactive: {0}")]
    InactiveFactor(FactorId),

    /// Basis value must be strictly positive.
    #[error("Basis value must be greater than zero, got {0}")]
    InvalidBasisValue(String),

    /// No target months were given.
    #[error("Target months must not be empty")]
    EmptyTargetMonths,

    /// One or more month keys are not `YYYYMM`.
    #[error("Invalid year-month format (expected YYYYMM): {}", .0.join(", "))]
    InvalidYearMonthFormat(Vec<String>),

    /// No formula exists for the factor type.
    #[error("Unsupported factor type: {0}")]
    UnsupportedFactorType(String),

    /// Forecast-driven calculation lacks forecasts for some months.
    #[error("Missing forecast for factor {factor_id} in: {}", join_months(.months))]
    MissingForecast {
        /// Factor ID.
        factor_id: FactorId,
        /// Months without a forecast.
        months: Vec<YearMonth>,
    },

    /// A computed amount or total is out of range.
    #[error(transparent)]
    AmountOverflow(#[from] AmountOverflow),
}

fn join_months(months: &[YearMonth]) -> String {
    months
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<CalculationError> for AppError {
    fn from(e: CalculationError) -> Self {
        Self::Validation(e.to_string())
    }
}
