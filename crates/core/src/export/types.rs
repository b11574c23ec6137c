//! Report export types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use yojitsu_shared::types::YearMonth;

use crate::master::AccountCategory;

/// Output format of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// XLSX workbook.
    Excel,
    /// CSV document.
    Csv,
    /// PDF (not available).
    Pdf,
}

/// What goes into a report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportOptions {
    /// First month included.
    pub start_month: YearMonth,
    /// Last month included.
    pub end_month: YearMonth,
    /// Categories included; empty means all. Unknown accounts are only
    /// included when no filter is given.
    #[serde(default)]
    pub account_categories: Vec<AccountCategory>,
    /// Output format.
    pub format: ExportFormat,
}

/// Budget versus actual for one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyComparisonRow {
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
}

/// Totals of one account with its monthly breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountDetail {
    /// Account code.
    pub account_code: String,
    /// Account name.
    pub account_name: String,
    /// Account category.
    pub category: Option<AccountCategory>,
    /// Monthly comparison sorted by month.
    pub monthly: Vec<MonthlyComparisonRow>,
    /// Budget total.
    pub total_budget: Decimal,
    /// Actual total.
    pub total_actual: Decimal,
    /// Actual minus budget.
    pub total_variance: Decimal,
    /// Variance rate in percent, 2 dp.
    pub total_variance_rate: Decimal,
}

/// Totals of one vendor with its account breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VendorSummary {
    /// Vendor code.
    pub vendor_code: String,
    /// Vendor name.
    pub vendor_name: String,
    /// Per-account details for this vendor.
    pub account_details: Vec<AccountDetail>,
    /// Budget total.
    pub total_budget: Decimal,
    /// Actual total.
    pub total_actual: Decimal,
    /// Actual minus budget.
    pub total_variance: Decimal,
    /// Variance rate in percent, 2 dp.
    pub total_variance_rate: Decimal,
}

/// The three flat tables every report is made of.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportTables {
    /// Monthly comparison across all accounts.
    pub monthly: Vec<MonthlyComparisonRow>,
    /// Account details.
    pub accounts: Vec<AccountDetail>,
    /// Vendor summary.
    pub vendors: Vec<VendorSummary>,
}

/// A rendered report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    /// Suggested file name.
    pub file_name: String,
    /// MIME type.
    pub content_type: &'static str,
    /// File content.
    pub bytes: Vec<u8>,
}
