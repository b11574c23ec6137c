//! Actuals: imported transactions and their monthly and vendor aggregates.

pub mod grid;
pub mod import;
pub mod types;
pub mod vendor;


pub use grid::{build_actual_grid, summarize_actuals};
pub use import::{
    ActualImportRow, ActualImporter, ImportError, ImportMode, ImportReport, ImportRowError,
};
pub use types::{
    Actual, ActualGridRow, ActualSummary, MonthlyActual, MonthlyActualTotal, VendorAccountShare,
    VendorActualSummary, VendorMonthlyTotal,
};
pub use vendor::aggregate_by_vendor;
