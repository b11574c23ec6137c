//! Budget data types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use yojitsu_shared::types::{
    AccountId, BudgetId, FactorId, FiscalYear, UserId, VendorId, VersionId, YearMonth,
};

use crate::master::AccountCategory;
use crate::record::LedgerRecord;

/// How a budget amount was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculationType {
    /// Entered by hand.
    #[default]
    Manual,
    /// Derived from a fluctuation factor.
    #[serde(alias = "factor")]
    FactorLinked,
}

/// A budget row.
///
/// Exactly one row exists per (account, vendor, month, version).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    /// Budget ID.
    pub id: BudgetId,
    /// Account ID.
    pub account_id: AccountId,
    /// Vendor ID.
    #[serde(default)]
    pub vendor_id: Option<VendorId>,
    /// Month.
    pub year_month: YearMonth,
    /// Budgeted amount in whole currency units.
    pub budget_amount: Decimal,
    /// Version (scenario) the row belongs to.
    pub version_id: VersionId,
    /// How the amount was produced.
    #[serde(default)]
    pub calculation_type: CalculationType,
    /// Driving factor, when factor-linked.
    #[serde(default)]
    pub linked_factor_id: Option<FactorId>,
    /// Driver value the amount was computed from, when factor-linked.
    #[serde(default)]
    pub basis_value: Option<Decimal>,
    /// User who created the row.
    #[serde(default)]
    pub created_by: Option<UserId>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl LedgerRecord for Budget {
    fn account_id(&self) -> &AccountId {
        &self.account_id
    }

    fn vendor_id(&self) -> Option<&VendorId> {
        self.vendor_id.as_ref()
    }

    fn year_month(&self) -> YearMonth {
        self.year_month
    }

    fn amount(&self) -> Decimal {
        self.budget_amount
    }
}

/// A named budget scenario such as "normal" or "optimistic".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetVersion {
    /// Version ID.
    pub id: VersionId,
    /// Version name.
    pub name: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// Confirmed versions are read-only baselines.
    #[serde(default)]
    pub is_confirmed: bool,
    /// Who confirmed the version.
    #[serde(default)]
    pub confirmed_by: Option<UserId>,
    /// When the version was confirmed.
    #[serde(default)]
    pub confirmed_at: Option<DateTime<Utc>>,
    /// Version this one was forked from.
    #[serde(default)]
    pub forked_from: Option<VersionId>,
}

/// Input for creating or updating a budget row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetInput {
    /// Account ID.
    pub account_id: AccountId,
    /// Vendor ID.
    #[serde(default)]
    pub vendor_id: Option<VendorId>,
    /// Month.
    pub year_month: YearMonth,
    /// Amount for manual rows; ignored for factor-linked rows.
    #[serde(default)]
    pub budget_amount: Decimal,
    /// Target version.
    pub version_id: VersionId,
    /// Calculation type.
    #[serde(default)]
    pub calculation_type: CalculationType,
    /// Driving factor (factor-linked only).
    #[serde(default)]
    pub linked_factor_id: Option<FactorId>,
    /// Driver value (factor-linked only).
    #[serde(default)]
    pub basis_value: Option<Decimal>,
    /// Acting user.
    #[serde(default)]
    pub user_id: Option<UserId>,
}

/// One month of a budget grid row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyBudget {
    /// Calendar month (1..=12).
    pub month: u32,
    /// Month key.
    pub year_month: YearMonth,
    /// Sum of contributing budget rows, zero when none.
    pub amount: Decimal,
    /// True when any contributing row is factor-linked.
    pub is_calculated: bool,
    /// First contributing row, for editing.
    pub budget_id: Option<BudgetId>,
}

/// Budgets of one (account, vendor) pair over a fiscal year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetGridRow {
    /// Account ID.
    pub account_id: AccountId,
    /// Account code.
    pub account_code: String,
    /// Account name.
    pub account_name: String,
    /// Account category, if the account is known.
    pub category: Option<AccountCategory>,
    /// Vendor ID.
    pub vendor_id: Option<VendorId>,
    /// Vendor name.
    pub vendor_name: Option<String>,
    /// 12 slots in fiscal order.
    pub monthly_budgets: Vec<MonthlyBudget>,
    /// Sum of the 12 slots.
    pub annual_total: Decimal,
    /// True when any slot is calculated.
    pub has_factor_link: bool,
}

/// Total of one month across all budget rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyBudgetTotal {
    /// Month key.
    pub year_month: YearMonth,
    /// Total.
    pub amount: Decimal,
}

/// Budget totals over a fiscal year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetSummary {
    /// Fiscal year.
    pub fiscal_year: FiscalYear,
    /// Total of all rows in the year.
    pub total_amount: Decimal,
    /// Cost-of-sales share.
    pub cost_of_sales_total: Decimal,
    /// Selling and admin share.
    pub selling_admin_total: Decimal,
    /// 12 monthly totals in fiscal order.
    pub monthly_totals: Vec<MonthlyBudgetTotal>,
    /// Number of rows in the year.
    pub row_count: usize,
}
