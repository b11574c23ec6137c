//! Shared projection over budget and actual rows.
//!
//! Budgets and actuals are distinct records, but aggregation only needs
//! `{account, vendor, month, amount}`. Both implement `LedgerRecord`, so
//! grouping and totalling are written once.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use yojitsu_shared::types::amount::checked_sum;
use yojitsu_shared::types::{
    AccountId, AmountOverflow, FiscalYear, MONTHS_PER_YEAR, VendorId, YearMonth,
};

use crate::master::MasterData;

/// A row that contributes an amount to an account in a month.
pub trait LedgerRecord {
    /// Account the amount is booked to.
    fn account_id(&self) -> &AccountId;
    /// Vendor, if any.
    fn vendor_id(&self) -> Option<&VendorId>;
    /// Period key.
    fn year_month(&self) -> YearMonth;
    /// Amount in currency units.
    fn amount(&self) -> Decimal;
}

/// Sums the amounts of rows booked to `year_month`.
pub fn total_for_month<'a, T, I>(
    items: I,
    year_month: YearMonth,
) -> Result<Decimal, AmountOverflow>
where
    T: LedgerRecord + 'a,
    I: IntoIterator<Item = &'a T>,
{
    checked_sum(
        items
            .into_iter()
            .filter(|item| item.year_month() == year_month)
            .map(|item| item.amount()),
    )
}

/// Groups rows by account, keeping first-appearance order of accounts.
pub fn group_by_account<'a, T, I>(items: I) -> Vec<(AccountId, Vec<&'a T>)>
where
    T: LedgerRecord + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut index: HashMap<AccountId, usize> = HashMap::new();
    let mut groups: Vec<(AccountId, Vec<&'a T>)> = Vec::new();

    for item in items {
        let account_id = item.account_id();
        if let Some(&i) = index.get(account_id) {
            groups[i].1.push(item);
        } else {
            index.insert(account_id.clone(), groups.len());
            groups.push((account_id.clone(), vec![item]));
        }
    }

    groups
}

/// Identity of one grid row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridKey {
    /// Account ID.
    pub account_id: AccountId,
    /// Vendor ID, when the row is vendor-specific.
    pub vendor_id: Option<VendorId>,
}

impl GridKey {
    /// Key for a row.
    #[must_use]
    pub fn new(account_id: AccountId, vendor_id: Option<VendorId>) -> Self {
        Self {
            account_id,
            vendor_id,
        }
    }

    fn of<T: LedgerRecord>(item: &T) -> Self {
        Self::new(item.account_id().clone(), item.vendor_id().cloned())
    }
}

/// The frame a monthly grid is laid out in.
///
/// `rows` are always present in the output, in this order, even with no data;
/// groups found only in the data are appended after them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridShape {
    /// Fiscal year providing the 12 month slots.
    pub fiscal_year: FiscalYear,
    /// Reference rows.
    #[serde(default)]
    pub rows: Vec<GridKey>,
}

impl GridShape {
    /// A shape with no reference rows.
    #[must_use]
    pub fn new(fiscal_year: FiscalYear) -> Self {
        Self {
            fiscal_year,
            rows: Vec::new(),
        }
    }

    /// One vendor-less reference row per active account.
    #[must_use]
    pub fn from_master(fiscal_year: FiscalYear, master: &MasterData) -> Self {
        Self {
            fiscal_year,
            rows: master
                .active_accounts()
                .into_iter()
                .map(|a| GridKey::new(a.id.clone(), None))
                .collect(),
        }
    }
}

/// Rows grouped into one row per key and one bucket per fiscal month.
pub(crate) struct GroupedRow<'a, T> {
    pub key: GridKey,
    pub slots: [Vec<&'a T>; MONTHS_PER_YEAR],
}

/// Lays rows into the grid frame. Rows outside the fiscal year are ignored.
pub(crate) fn group_into_grid<'a, T: LedgerRecord>(
    items: &'a [T],
    shape: &GridShape,
) -> Vec<GroupedRow<'a, T>> {
    let mut index: HashMap<GridKey, usize> = HashMap::new();
    let mut rows: Vec<GroupedRow<'a, T>> = Vec::new();

    for key in &shape.rows {
        if !index.contains_key(key) {
            index.insert(key.clone(), rows.len());
            rows.push(GroupedRow {
                key: key.clone(),
                slots: std::array::from_fn(|_| Vec::new()),
            });
        }
    }

    for item in items {
        let Some(slot) = shape.fiscal_year.slot_of(item.year_month()) else {
            continue;
        };
        let key = GridKey::of(item);
        let row = if let Some(&i) = index.get(&key) {
            i
        } else {
            index.insert(key.clone(), rows.len());
            rows.push(GroupedRow {
                key,
                slots: std::array::from_fn(|_| Vec::new()),
            });
            rows.len() - 1
        };
        rows[row].slots[slot].push(item);
    }

    rows
}
