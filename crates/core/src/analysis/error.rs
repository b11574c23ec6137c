//! Analysis error types.

use thiserror::Error;
use yojitsu_shared::AppError;
use yojitsu_shared::types::AmountOverflow;

/// Variance analysis errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    /// Period key is not `YYYYMM`.
    #[error("Invalid year-month format (expected YYYYMM): {0:?}")]
    InvalidYearMonthFormat(String),

    /// Neither budgets nor actuals were given.
    #[error("No budget or actual data available")]
    NoDataAvailable,

    /// A total or rate is out of range.
    #[error(transparent)]
    AmountOverflow(#[from] AmountOverflow),
}

impl From<AnalysisError> for AppError {
    fn from(e: AnalysisError) -> Self {
        Self::Validation(e.to_string())
    }
}
