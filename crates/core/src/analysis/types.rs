//! Variance and KPI analysis types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use yojitsu_shared::config::AnalysisConfig;
use yojitsu_shared::types::{AccountId, FiscalYear, YearMonth};

use crate::master::AccountCategory;

/// Thresholds used by the analyzer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisSettings {
    /// Absolute variance rate in percent at which a variance is significant.
    pub significant_variance_threshold: Decimal,
    /// Number of significant variances surfaced in the KPI summary.
    pub top_n_variances: usize,
}

impl AnalysisSettings {
    /// Default significance threshold (10%).
    pub const SIGNIFICANT_VARIANCE_THRESHOLD: Decimal = Decimal::TEN;
    /// Default number of surfaced variances.
    pub const TOP_N_VARIANCES: usize = 5;
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            significant_variance_threshold: Self::SIGNIFICANT_VARIANCE_THRESHOLD,
            top_n_variances: Self::TOP_N_VARIANCES,
        }
    }
}

impl From<&AnalysisConfig> for AnalysisSettings {
    fn from(config: &AnalysisConfig) -> Self {
        Self {
            significant_variance_threshold: config.significant_variance_threshold,
            top_n_variances: config.top_n_variances,
        }
    }
}

/// Budget versus actual for one account in one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VarianceAnalysis {
    /// Account ID.
    pub account_id: AccountId,
    /// Account name, or the ID when the account is unknown.
    pub account_name: String,
    /// Account category, if the account is known.
    pub category: Option<AccountCategory>,
    /// Month analyzed.
    pub year_month: YearMonth,
    /// Budgeted amount.
    pub budget_amount: Decimal,
    /// Actual amount.
    pub actual_amount: Decimal,
    /// Actual minus budget.
    pub variance_amount: Decimal,
    /// Variance over budget in percent, 2 dp. Zero when the budget is zero.
    pub variance_rate: Decimal,
    /// Whether the absolute rate reaches the threshold.
    pub is_significant: bool,
}

/// Period-level KPIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KpiAnalysis {
    /// Month analyzed.
    pub year_month: YearMonth,
    /// Sum of all budgets in the month.
    pub total_budget: Decimal,
    /// Sum of all actuals in the month.
    pub total_actual: Decimal,
    /// Total actual minus total budget.
    pub total_variance: Decimal,
    /// Actual over budget in percent, 2 dp. Zero when the budget is zero.
    pub achievement_rate: Decimal,
    /// Total variance over budget in percent, 2 dp.
    pub variance_rate: Decimal,
    /// Variance of cost-of-sales accounts.
    pub cost_of_sales_variance: Decimal,
    /// Variance of selling and admin accounts.
    pub selling_admin_variance: Decimal,
    /// Largest significant variances.
    pub significant_variances: Vec<VarianceAnalysis>,
}

/// Budget versus actual totals for one month of a fiscal year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyComparison {
    /// Calendar month (1..=12).
    pub month: u32,
    /// Month key.
    pub year_month: YearMonth,
    /// Budget total.
    pub budget_amount: Decimal,
    /// Actual total.
    pub actual_amount: Decimal,
    /// Actual minus budget.
    pub variance_amount: Decimal,
    /// Variance rate in percent, 2 dp.
    pub variance_rate: Decimal,
    /// Whether the absolute rate reaches the threshold.
    pub is_significant: bool,
}

/// Month-by-month comparison over a fiscal year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FiscalYearAnalysis {
    /// Fiscal year.
    pub fiscal_year: FiscalYear,
    /// 12 months in fiscal order.
    pub monthly: Vec<MonthlyComparison>,
    /// Budget total of the year.
    pub total_budget: Decimal,
    /// Actual total of the year.
    pub total_actual: Decimal,
    /// Actual minus budget for the year.
    pub total_variance: Decimal,
    /// Total variance rate in percent, 2 dp.
    pub total_variance_rate: Decimal,
    /// Significant months, largest absolute rate first.
    pub significant_months: Vec<MonthlyComparison>,
}
