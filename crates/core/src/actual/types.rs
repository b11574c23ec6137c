//! Actual (booked spend) data types.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use yojitsu_shared::types::{AccountId, ActualId, FiscalYear, VendorId, YearMonth};

use crate::master::AccountCategory;
use crate::record::LedgerRecord;

/// One imported transaction.
///
/// `year_month` is always derived from `transaction_date`; a stored value
/// that disagrees is replaced on deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredActual")]
pub struct Actual {
    /// Actual ID.
    pub id: ActualId,
    /// Account ID.
    pub account_id: AccountId,
    /// Vendor ID.
    pub vendor_id: Option<VendorId>,
    /// Transaction date.
    pub transaction_date: NaiveDate,
    /// Month of the transaction.
    pub year_month: YearMonth,
    /// Amount in currency units.
    pub amount: Decimal,
    /// Free-text description.
    pub description: Option<String>,
    /// File the row was imported from.
    pub source_file_name: Option<String>,
    /// Import timestamp.
    pub imported_at: Option<DateTime<Utc>>,
}

impl Actual {
    /// Creates an actual, deriving its month from the transaction date.
    #[must_use]
    pub fn new(
        account_id: AccountId,
        vendor_id: Option<VendorId>,
        transaction_date: NaiveDate,
        amount: Decimal,
    ) -> Self {
        Self {
            id: ActualId::generate(),
            account_id,
            vendor_id,
            transaction_date,
            year_month: YearMonth::from_date(transaction_date),
            amount,
            description: None,
            source_file_name: None,
            imported_at: None,
        }
    }
}

#[derive(Deserialize)]
struct StoredActual {
    id: ActualId,
    account_id: AccountId,
    #[serde(default)]
    vendor_id: Option<VendorId>,
    transaction_date: NaiveDate,
    amount: Decimal,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    source_file_name: Option<String>,
    #[serde(default)]
    imported_at: Option<DateTime<Utc>>,
}

impl From<StoredActual> for Actual {
    fn from(s: StoredActual) -> Self {
        Self {
            id: s.id,
            account_id: s.account_id,
            vendor_id: s.vendor_id,
            year_month: YearMonth::from_date(s.transaction_date),
            transaction_date: s.transaction_date,
            amount: s.amount,
            description: s.description,
            source_file_name: s.source_file_name,
            imported_at: s.imported_at,
        }
    }
}

impl LedgerRecord for Actual {
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
        self.amount
    }
}

/// One month of an actual grid row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyActual {
    /// Calendar month (1..=12).
    pub month: u32,
    /// Month key.
    pub year_month: YearMonth,
    /// Sum of contributing actuals, zero when none.
    pub amount: Decimal,
    /// Number of contributing actuals.
    pub transaction_count: usize,
    /// Latest transaction date among contributors.
    pub last_transaction_date: Option<NaiveDate>,
}

/// Actuals of one (account, vendor) pair over a fiscal year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActualGridRow {
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
    pub monthly_actuals: Vec<MonthlyActual>,
    /// Sum of the 12 slots.
    pub annual_total: Decimal,
    /// Sum of the 12 slot counts.
    pub transaction_count: usize,
}

/// An account's share of one vendor's spend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VendorAccountShare {
    /// Account ID.
    pub account_id: AccountId,
    /// Account name.
    pub account_name: String,
    /// Amount booked to the account for this vendor.
    pub amount: Decimal,
    /// Number of transactions.
    pub transaction_count: usize,
    /// Share of the vendor total in percent, 2 dp. Zero when the vendor total is zero.
    pub percentage_of_vendor_total: Decimal,
}

/// One month of a vendor's spend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VendorMonthlyTotal {
    /// Month key.
    pub year_month: YearMonth,
    /// Amount.
    pub amount: Decimal,
    /// Number of transactions.
    pub transaction_count: usize,
}

/// Spend of one vendor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VendorActualSummary {
    /// Vendor ID.
    pub vendor_id: VendorId,
    /// Vendor code.
    pub vendor_code: String,
    /// Vendor name.
    pub vendor_name: String,
    /// Total across all months.
    pub total_amount: Decimal,
    /// Number of transactions.
    pub transaction_count: usize,
    /// Per-account breakdown, in first-appearance order.
    pub account_breakdown: Vec<VendorAccountShare>,
    /// Monthly totals sorted by month.
    pub monthly_totals: Vec<VendorMonthlyTotal>,
}

/// Total of one month across all actuals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyActualTotal {
    /// Month key.
    pub year_month: YearMonth,
    /// Total.
    pub amount: Decimal,
    /// Cost-of-sales share.
    pub cost_of_sales: Decimal,
    /// Selling and admin share.
    pub selling_admin: Decimal,
    /// Number of transactions.
    pub transaction_count: usize,
}

/// Actual totals over a fiscal year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActualSummary {
    /// Fiscal year.
    pub fiscal_year: FiscalYear,
    /// Total of all actuals in the year.
    pub total_amount: Decimal,
    /// Cost-of-sales share.
    pub cost_of_sales_total: Decimal,
    /// Selling and admin share.
    pub selling_admin_total: Decimal,
    /// 12 monthly totals in fiscal order.
    pub monthly_totals: Vec<MonthlyActualTotal>,
    /// Number of transactions in the year.
    pub transaction_count: usize,
}
