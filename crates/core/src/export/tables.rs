//! Flattening budgets and actuals into report tables.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use yojitsu_shared::types::amount::{checked_add, checked_sum};
use yojitsu_shared::types::{AccountId, AmountOverflow, VendorId, YearMonth};

use super::types::{
    AccountDetail, ExportOptions, MonthlyComparisonRow, ReportTables, VendorSummary,
};
use crate::actual::Actual;
use crate::analysis::Variance;
use crate::budget::Budget;
use crate::master::MasterData;
use crate::record::LedgerRecord;

/// Builds the monthly, account and vendor tables for `options`.
///
/// Only rows inside the month range and matching the category filter are
/// counted. Budgets and actuals without a vendor appear in the monthly and
/// account tables but not in the vendor summary.
///
/// # Errors
///
/// Returns `AmountOverflow` when a total or rate is out of range.
pub fn build_tables(
    master: &MasterData,
    budgets: &[Budget],
    actuals: &[Actual],
    options: &ExportOptions,
) -> Result<ReportTables, AmountOverflow> {
    let budgets: Vec<&Budget> = budgets
        .iter()
        .filter(|b| in_scope(*b, master, options))
        .collect();
    let actuals: Vec<&Actual> = actuals
        .iter()
        .filter(|a| in_scope(*a, master, options))
        .collect();

    let monthly = monthly_rows(&budgets, &actuals)?;
    let accounts = account_details(master, &budgets, &actuals)?;

    let mut vendor_order: Vec<&VendorId> = Vec::new();
    for vendor_id in budgets
        .iter()
        .filter_map(|b| b.vendor_id())
        .chain(actuals.iter().filter_map(|a| a.vendor_id()))
    {
        if !vendor_order.contains(&vendor_id) {
            vendor_order.push(vendor_id);
        }
    }

    let vendors = vendor_order
        .into_iter()
        .map(|vendor_id| -> Result<VendorSummary, AmountOverflow> {
            let vb: Vec<&Budget> = budgets
                .iter()
                .copied()
                .filter(|b| b.vendor_id() == Some(vendor_id))
                .collect();
            let va: Vec<&Actual> = actuals
                .iter()
                .copied()
                .filter(|a| a.vendor_id() == Some(vendor_id))
                .collect();
            let account_details = account_details(master, &vb, &va)?;
            let total = Variance::between(
                checked_sum(account_details.iter().map(|d| d.total_budget))?,
                checked_sum(account_details.iter().map(|d| d.total_actual))?,
            )?;
            Ok(VendorSummary {
                vendor_code: master.vendor_code(vendor_id),
                vendor_name: master.vendor_name(vendor_id),
                account_details,
                total_budget: total.budget,
                total_actual: total.actual,
                total_variance: total.amount,
                total_variance_rate: total.rounded_rate(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ReportTables {
        monthly,
        accounts,
        vendors,
    })
}

fn in_scope<T: LedgerRecord>(item: &T, master: &MasterData, options: &ExportOptions) -> bool {
    let ym = item.year_month();
    if ym < options.start_month || ym > options.end_month {
        return false;
    }
    options.account_categories.is_empty()
        || master
            .account_category(item.account_id())
            .is_some_and(|c| options.account_categories.contains(&c))
}

fn monthly_rows(
    budgets: &[&Budget],
    actuals: &[&Actual],
) -> Result<Vec<MonthlyComparisonRow>, AmountOverflow> {
    let mut months: BTreeMap<YearMonth, (Decimal, Decimal)> = BTreeMap::new();
    for b in budgets {
        let entry = months.entry(b.year_month()).or_default();
        entry.0 = checked_add(entry.0, b.amount())?;
    }
    for a in actuals {
        let entry = months.entry(a.year_month()).or_default();
        entry.1 = checked_add(entry.1, a.amount())?;
    }

    let mut rows = Vec::with_capacity(months.len());
    for (year_month, (budget, actual)) in months {
        let v = Variance::between(budget, actual)?;
        rows.push(MonthlyComparisonRow {
            year_month,
            budget_amount: v.budget,
            actual_amount: v.actual,
            variance_amount: v.amount,
            variance_rate: v.rounded_rate(),
        });
    }
    Ok(rows)
}

fn account_details(
    master: &MasterData,
    budgets: &[&Budget],
    actuals: &[&Actual],
) -> Result<Vec<AccountDetail>, AmountOverflow> {
    let mut order: Vec<&AccountId> = Vec::new();
    for account_id in budgets
        .iter()
        .map(|b| b.account_id())
        .chain(actuals.iter().map(|a| a.account_id()))
    {
        if !order.contains(&account_id) {
            order.push(account_id);
        }
    }

    order
        .into_iter()
        .map(|account_id| -> Result<AccountDetail, AmountOverflow> {
            let ab: Vec<&Budget> = budgets
                .iter()
                .copied()
                .filter(|b| b.account_id() == account_id)
                .collect();
            let aa: Vec<&Actual> = actuals
                .iter()
                .copied()
                .filter(|a| a.account_id() == account_id)
                .collect();
            let monthly = monthly_rows(&ab, &aa)?;
            let total = Variance::between(
                checked_sum(monthly.iter().map(|m| m.budget_amount))?,
                checked_sum(monthly.iter().map(|m| m.actual_amount))?,
            )?;
            Ok(AccountDetail {
                account_code: master.account_code(account_id),
                account_name: master.account_name(account_id),
                category: master.account_category(account_id),
                monthly,
                total_budget: total.budget,
                total_actual: total.actual,
                total_variance: total.amount,
                total_variance_rate: total.rounded_rate(),
            })
        })
        .collect()
}
