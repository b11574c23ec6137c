//! Core business logic for Yojitsu.
//!
//! This crate contains pure budget-versus-actuals logic with ZERO web dependencies.
//! Services take slices of records and return new values; only `store` holds state.
//!
//! # Modules
//!
//! - `master` - Accounts, vendors, and the read-only lookup over them
//! - `record` - Grouping shared by budgets and actuals
//! - `factor` - Fluctuation factors and factor-linked budget calculation
//! - `budget` - Budget rows, versions, grid, and summary
//! - `actual` - Actuals, import validation, grid, vendor aggregation
//! - `analysis` - Variance, KPI, and fiscal-year comparison
//! - `export` - CSV and Excel reports
//! - `store` - Repository interface and in-memory persistence

pub mod actual;
pub mod analysis;
pub mod budget;
pub mod export;
pub mod factor;
pub mod master;
pub mod record;
pub mod store;

#[cfg(test)]
mod testing;
