//! Budgets, budget versions, and the monthly budget grid.

pub mod error;
pub mod grid;
pub mod service;
pub mod types;
pub mod version;

#[cfg(test)]
mod tests;

pub use error::{BudgetError, VersionError};
pub use grid::{build_budget_grid, summarize_budgets};
pub use service::{BudgetService, round_to_units};
pub use types::{
    Budget, BudgetGridRow, BudgetInput, BudgetSummary, BudgetVersion, CalculationType,
    MonthlyBudget, MonthlyBudgetTotal,
};
pub use version::VersionService;
