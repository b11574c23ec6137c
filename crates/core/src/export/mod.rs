//! Budget versus actual report export (CSV and Excel).

mod csv;
pub mod error;
mod excel;
pub mod service;
pub mod tables;
pub mod types;


pub use error::ExportError;
pub use service::ExportService;
pub use tables::build_tables;
pub use types::{
    AccountDetail, ExportFile, ExportFormat, ExportOptions, MonthlyComparisonRow, ReportTables,
    VendorSummary,
};
