//! Budget grid and summary aggregation.

use rust_decimal::Decimal;
use yojitsu_shared::types::FiscalYear;

use super::types::{
    Budget, BudgetGridRow, BudgetSummary, CalculationType, MonthlyBudget, MonthlyBudgetTotal,
};
use crate::master::{AccountCategory, MasterData};
use crate::record::{GridShape, group_into_grid};

/// Builds one grid row per (account, vendor) with 12 monthly slots.
///
/// Reference rows from `shape` always appear, in order, even without data.
/// Rows outside the fiscal year are ignored. The function keeps no state, so
/// equal inputs give equal output.
#[must_use]
pub fn build_budget_grid(
    budgets: &[Budget],
    shape: &GridShape,
    master: &MasterData,
) -> Vec<BudgetGridRow> {
    let months = shape.fiscal_year.months();

    group_into_grid(budgets, shape)
        .into_iter()
        .map(|grouped| {
            let monthly_budgets: Vec<MonthlyBudget> = grouped
                .slots
                .iter()
                .zip(months)
                .map(|(contributors, year_month)| MonthlyBudget {
                    month: year_month.month(),
                    year_month,
                    amount: contributors.iter().map(|b| b.budget_amount).sum(),
                    is_calculated: contributors
                        .iter()
                        .any(|b| b.calculation_type == CalculationType::FactorLinked),
                    budget_id: contributors.first().map(|b| b.id.clone()),
                })
                .collect();

            let annual_total = monthly_budgets.iter().map(|m| m.amount).sum();
            let has_factor_link = monthly_budgets.iter().any(|m| m.is_calculated);
            let key = grouped.key;

            BudgetGridRow {
                account_code: master.account_code(&key.account_id),
                account_name: master.account_name(&key.account_id),
                category: master.account_category(&key.account_id),
                vendor_name: key.vendor_id.as_ref().map(|v| master.vendor_name(v)),
                account_id: key.account_id,
                vendor_id: key.vendor_id,
                monthly_budgets,
                annual_total,
                has_factor_link,
            }
        })
        .collect()
}

/// Totals budgets of a fiscal year, split by account category.
///
/// Rows of unknown accounts count toward the total but neither category.
#[must_use]
pub fn summarize_budgets(
    budgets: &[Budget],
    fiscal_year: &FiscalYear,
    master: &MasterData,
) -> BudgetSummary {
    let months = fiscal_year.months();
    let mut monthly = [Decimal::ZERO; yojitsu_shared::types::MONTHS_PER_YEAR];
    let mut cost_of_sales_total = Decimal::ZERO;
    let mut selling_admin_total = Decimal::ZERO;
    let mut row_count = 0;

    for budget in budgets {
        let Some(slot) = fiscal_year.slot_of(budget.year_month) else {
            continue;
        };
        monthly[slot] += budget.budget_amount;
        row_count += 1;
        match master.account_category(&budget.account_id) {
            Some(AccountCategory::CostOfSales) => cost_of_sales_total += budget.budget_amount,
            Some(AccountCategory::SellingAdmin) => selling_admin_total += budget.budget_amount,
            None => {}
        }
    }

    BudgetSummary {
        fiscal_year: *fiscal_year,
        total_amount: monthly.iter().sum(),
        cost_of_sales_total,
        selling_admin_total,
        monthly_totals: months
            .into_iter()
            .zip(monthly)
            .map(|(year_month, amount)| MonthlyBudgetTotal { year_month, amount })
            .collect(),
        row_count,
    }
}
