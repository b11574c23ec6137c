//! Actual grid and summary aggregation.

use rust_decimal::Decimal;
use yojitsu_shared::types::FiscalYear;

use super::types::{Actual, ActualGridRow, ActualSummary, MonthlyActual, MonthlyActualTotal};
use crate::master::{AccountCategory, MasterData};
use crate::record::{GridShape, group_into_grid};

/// Builds one grid row per (account, vendor) with 12 monthly slots.
///
/// Each slot also counts its transactions and keeps the latest transaction
/// date. Reference rows from `shape` always appear; actuals outside the
/// fiscal year are ignored.
#[must_use]
pub fn build_actual_grid(
    actuals: &[Actual],
    shape: &GridShape,
    master: &MasterData,
) -> Vec<ActualGridRow> {
    let months = shape.fiscal_year.months();

    group_into_grid(actuals, shape)
        .into_iter()
        .map(|grouped| {
            let monthly_actuals: Vec<MonthlyActual> = grouped
                .slots
                .iter()
                .zip(months)
                .map(|(contributors, year_month)| MonthlyActual {
                    month: year_month.month(),
                    year_month,
                    amount: contributors.iter().map(|a| a.amount).sum(),
                    transaction_count: contributors.len(),
                    last_transaction_date: contributors.iter().map(|a| a.transaction_date).max(),
                })
                .collect();

            let annual_total = monthly_actuals.iter().map(|m| m.amount).sum();
            let transaction_count = monthly_actuals.iter().map(|m| m.transaction_count).sum();
            let key = grouped.key;

            ActualGridRow {
                account_code: master.account_code(&key.account_id),
                account_name: master.account_name(&key.account_id),
                category: master.account_category(&key.account_id),
                vendor_name: key.vendor_id.as_ref().map(|v| master.vendor_name(v)),
                account_id: key.account_id,
                vendor_id: key.vendor_id,
                monthly_actuals,
                annual_total,
                transaction_count,
            }
        })
        .collect()
}

/// Totals actuals of a fiscal year by month and account category.
#[must_use]
pub fn summarize_actuals(
    actuals: &[Actual],
    fiscal_year: &FiscalYear,
    master: &MasterData,
) -> ActualSummary {
    let mut monthly: Vec<MonthlyActualTotal> = fiscal_year
        .months()
        .into_iter()
        .map(|year_month| MonthlyActualTotal {
            year_month,
            amount: Decimal::ZERO,
            cost_of_sales: Decimal::ZERO,
            selling_admin: Decimal::ZERO,
            transaction_count: 0,
        })
        .collect();

    for actual in actuals {
        let Some(slot) = fiscal_year.slot_of(actual.year_month) else {
            continue;
        };
        let total = &mut monthly[slot];
        total.amount += actual.amount;
        total.transaction_count += 1;
        match master.account_category(&actual.account_id) {
            Some(AccountCategory::CostOfSales) => total.cost_of_sales += actual.amount,
            Some(AccountCategory::SellingAdmin) => total.selling_admin += actual.amount,
            None => {}
        }
    }

    ActualSummary {
        fiscal_year: *fiscal_year,
        total_amount: monthly.iter().map(|m| m.amount).sum(),
        cost_of_sales_total: monthly.iter().map(|m| m.cost_of_sales).sum(),
        selling_admin_total: monthly.iter().map(|m| m.selling_admin).sum(),
        transaction_count: monthly.iter().map(|m| m.transaction_count).sum(),
        monthly_totals: monthly,
    }
}
