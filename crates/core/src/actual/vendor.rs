//! Vendor-oriented aggregation of actuals.

use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;
use yojitsu_shared::types::{AccountId, VendorId, YearMonth};

use super::types::{Actual, VendorAccountShare, VendorActualSummary, VendorMonthlyTotal};
use crate::master::MasterData;

#[derive(Default)]
struct VendorAccumulator<'a> {
    total: Decimal,
    count: usize,
    accounts: Vec<(&'a AccountId, Decimal, usize)>,
    months: BTreeMap<YearMonth, (Decimal, usize)>,
}

/// Groups actuals by vendor, in first-appearance order.
///
/// Each vendor carries an account breakdown with every account's share of the
/// vendor total (percent, 2 dp; zero when the vendor total is zero) and
/// monthly totals sorted by month. Actuals without a vendor are skipped.
#[must_use]
pub fn aggregate_by_vendor(actuals: &[Actual], master: &MasterData) -> Vec<VendorActualSummary> {
    let mut index: HashMap<&VendorId, usize> = HashMap::new();
    let mut vendors: Vec<(&VendorId, VendorAccumulator<'_>)> = Vec::new();

    for actual in actuals {
        let Some(vendor_id) = actual.vendor_id.as_ref() else {
            continue;
        };
        let i = *index.entry(vendor_id).or_insert_with(|| {
            vendors.push((vendor_id, VendorAccumulator::default()));
            vendors.len() - 1
        });
        let acc = &mut vendors[i].1;

        acc.total += actual.amount;
        acc.count += 1;

        if let Some(entry) = acc.accounts.iter_mut().find(|e| e.0 == &actual.account_id) {
            entry.1 += actual.amount;
            entry.2 += 1;
        } else {
            acc.accounts.push((&actual.account_id, actual.amount, 1));
        }

        let month = acc.months.entry(actual.year_month).or_default();
        month.0 += actual.amount;
        month.1 += 1;
    }

    vendors
        .into_iter()
        .map(|(vendor_id, acc)| VendorActualSummary {
            vendor_id: vendor_id.clone(),
            vendor_code: master.vendor_code(vendor_id),
            vendor_name: master.vendor_name(vendor_id),
            total_amount: acc.total,
            transaction_count: acc.count,
            account_breakdown: acc
                .accounts
                .into_iter()
                .map(|(account_id, amount, transaction_count)| VendorAccountShare {
                    account_id: account_id.clone(),
                    account_name: master.account_name(account_id),
                    amount,
                    transaction_count,
                    percentage_of_vendor_total: share_percent(amount, acc.total),
                })
                .collect(),
            monthly_totals: acc
                .months
                .into_iter()
                .map(|(year_month, (amount, transaction_count))| VendorMonthlyTotal {
                    year_month,
                    amount,
                    transaction_count,
                })
                .collect(),
        })
        .collect()
}

fn share_percent(part: Decimal, total: Decimal) -> Decimal {
    if total.is_zero() {
        Decimal::ZERO
    } else {
        (part / total * Decimal::ONE_HUNDRED).round_dp(2)
    }
}
