//! Common types used across the application.

pub mod amount;
pub mod id;
pub mod period;

pub use amount::{AmountOverflow, MAX_AMOUNT};
pub use id::*;
pub use period::{DEFAULT_FISCAL_START_MONTH, FiscalYear, MONTHS_PER_YEAR, PeriodError, YearMonth};
