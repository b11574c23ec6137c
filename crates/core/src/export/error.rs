//! Export error types.

use thiserror::Error;
use yojitsu_shared::AppError;
use yojitsu_shared::types::{AmountOverflow, YearMonth};

/// Report export errors.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Format exists in the contract but cannot be produced.
    #[error("{0} export is not implemented")]
    NotImplemented(&'static str),

    /// Start month is after end month.
    #[error("Invalid export range: {start} is after {end}")]
    InvalidRange {
        /// First month.
        start: YearMonth,
        /// Last month.
        end: YearMonth,
    },

    /// A report total or rate is out of range.
    #[error(transparent)]
    AmountOverflow(#[from] AmountOverflow),

    /// CSV serialization failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Workbook serialization failed.
    #[error("Excel error: {0}")]
    Excel(#[from] rust_xlsxwriter::XlsxError),

    /// Buffer write failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ExportError> for AppError {
    fn from(e: ExportError) -> Self {
        match e {
            ExportError::NotImplemented(_) => Self::NotImplemented(e.to_string()),
            ExportError::InvalidRange { .. } | ExportError::AmountOverflow(_) => {
                Self::Validation(e.to_string())
            }
            ExportError::Csv(_) | ExportError::Excel(_) | ExportError::Io(_) => {
                Self::Internal(e.to_string())
            }
        }
    }
}
