//! Variance and KPI analyzer.

use rust_decimal::Decimal;
use yojitsu_shared::types::amount::checked_sum;
use yojitsu_shared::types::{AccountId, AmountOverflow, FiscalYear, YearMonth};
use yojitsu_shared::{Measurement, SharedMonitor};

use super::error::AnalysisError;
use super::types::{
    AnalysisSettings, FiscalYearAnalysis, KpiAnalysis, MonthlyComparison, VarianceAnalysis,
};
use super::variance::Variance;
use crate::actual::Actual;
use crate::budget::Budget;
use crate::master::{AccountCategory, MasterData};
use crate::record::{LedgerRecord, group_by_account, total_for_month};

/// Compares budgets with actuals.
///
/// Read-only over the slices it is given.
#[derive(Clone)]
pub struct VarianceAnalyzer {
    settings: AnalysisSettings,
    monitor: SharedMonitor,
}

impl std::fmt::Debug for VarianceAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VarianceAnalyzer")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl VarianceAnalyzer {
    /// Creates an analyzer.
    #[must_use]
    pub fn new(settings: AnalysisSettings, monitor: SharedMonitor) -> Self {
        Self { settings, monitor }
    }

    /// Settings in use.
    #[must_use]
    pub const fn settings(&self) -> &AnalysisSettings {
        &self.settings
    }

    /// Per-account variance for one month.
    ///
    /// Every account with a nonzero budget or actual in the month gets a row,
    /// budget accounts first. Rows are ordered by absolute variance amount,
    /// largest first; ties keep that grouping order.
    ///
    /// # Errors
    ///
    /// Returns `InvalidYearMonthFormat` when `year_month` is not `YYYYMM`,
    /// `NoDataAvailable` when both inputs are empty, and `AmountOverflow` when
    /// a total or rate is out of range.
    pub fn analyze_variance(
        &self,
        master: &MasterData,
        budgets: &[Budget],
        actuals: &[Actual],
        year_month: &str,
    ) -> Result<Vec<VarianceAnalysis>, AnalysisError> {
        let _m = Measurement::start(self.monitor.as_ref(), "analysis.analyze_variance");

        let ym = validate(budgets, actuals, year_month)?;
        let rows = self.variance_rows(master, budgets, actuals, ym)?;

        tracing::info!(
            year_month = %ym,
            accounts = rows.len(),
            significant = rows.iter().filter(|r| r.is_significant).count(),
            "Variance analysis completed"
        );

        Ok(rows)
    }

    /// Period KPIs for one month.
    ///
    /// # Errors
    ///
    /// Same as [`Self::analyze_variance`].
    pub fn analyze_kpi(
        &self,
        master: &MasterData,
        budgets: &[Budget],
        actuals: &[Actual],
        year_month: &str,
    ) -> Result<KpiAnalysis, AnalysisError> {
        let _m = Measurement::start(self.monitor.as_ref(), "analysis.analyze_kpi");

        let ym = validate(budgets, actuals, year_month)?;
        let rows = self.variance_rows(master, budgets, actuals, ym)?;

        let total =
            Variance::between(total_for_month(budgets, ym)?, total_for_month(actuals, ym)?)?;

        let category_variance = |category: AccountCategory| {
            checked_sum(
                rows.iter()
                    .filter(|r| r.category == Some(category))
                    .map(|r| r.variance_amount),
            )
        };
        let cost_of_sales_variance = category_variance(AccountCategory::CostOfSales)?;
        let selling_admin_variance = category_variance(AccountCategory::SellingAdmin)?;

        let significant_variances: Vec<VarianceAnalysis> = rows
            .into_iter()
            .filter(|r| r.is_significant)
            .take(self.settings.top_n_variances)
            .collect();

        tracing::info!(
            year_month = %ym,
            total_budget = %total.budget,
            total_actual = %total.actual,
            significant = significant_variances.len(),
            "KPI analysis completed"
        );

        Ok(KpiAnalysis {
            year_month: ym,
            total_budget: total.budget,
            total_actual: total.actual,
            total_variance: total.amount,
            achievement_rate: total.achievement_rate(),
            variance_rate: total.rounded_rate(),
            cost_of_sales_variance,
            selling_admin_variance,
            significant_variances,
        })
    }

    /// Month-by-month comparison over a fiscal year.
    ///
    /// Significant months are ordered by absolute variance rate, largest first.
    ///
    /// # Errors
    ///
    /// Returns `AmountOverflow` when a total or rate is out of range.
    pub fn analyze_fiscal_year(
        &self,
        budgets: &[Budget],
        actuals: &[Actual],
        fiscal_year: &FiscalYear,
    ) -> Result<FiscalYearAnalysis, AnalysisError> {
        let _m = Measurement::start(self.monitor.as_ref(), "analysis.analyze_fiscal_year");
        let threshold = self.settings.significant_variance_threshold;

        let months = fiscal_year
            .months()
            .into_iter()
            .map(|ym| -> Result<(MonthlyComparison, Variance), AnalysisError> {
                let v = Variance::between(
                    total_for_month(budgets, ym)?,
                    total_for_month(actuals, ym)?,
                )?;
                let comparison = MonthlyComparison {
                    month: ym.month(),
                    year_month: ym,
                    budget_amount: v.budget,
                    actual_amount: v.actual,
                    variance_amount: v.amount,
                    variance_rate: v.rounded_rate(),
                    is_significant: v.is_significant(threshold),
                };
                Ok((comparison, v))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let total = Variance::between(
            checked_sum(months.iter().map(|(_, v)| v.budget))?,
            checked_sum(months.iter().map(|(_, v)| v.actual))?,
        )?;

        let mut significant: Vec<&(MonthlyComparison, Variance)> =
            months.iter().filter(|(c, _)| c.is_significant).collect();
        significant.sort_by(|a, b| b.1.rate.abs().cmp(&a.1.rate.abs()));
        let significant_months = significant.into_iter().map(|(c, _)| c.clone()).collect();

        tracing::info!(
            fiscal_year = %fiscal_year,
            total_budget = %total.budget,
            total_actual = %total.actual,
            "Fiscal year analysis completed"
        );

        Ok(FiscalYearAnalysis {
            fiscal_year: *fiscal_year,
            monthly: months.into_iter().map(|(c, _)| c).collect(),
            total_budget: total.budget,
            total_actual: total.actual,
            total_variance: total.amount,
            total_variance_rate: total.rounded_rate(),
            significant_months,
        })
    }

    fn variance_rows(
        &self,
        master: &MasterData,
        budgets: &[Budget],
        actuals: &[Actual],
        ym: YearMonth,
    ) -> Result<Vec<VarianceAnalysis>, AnalysisError> {
        let threshold = self.settings.significant_variance_threshold;
        let budget_groups = group_by_account(budgets);
        let actual_groups = group_by_account(actuals);

        let mut accounts: Vec<&AccountId> = budget_groups.iter().map(|(id, _)| id).collect();
        for (id, _) in &actual_groups {
            if !accounts.contains(&id) {
                accounts.push(id);
            }
        }

        let mut rows = Vec::with_capacity(accounts.len());
        for account_id in accounts {
            let budget = month_total(&budget_groups, account_id, ym)?;
            let actual = month_total(&actual_groups, account_id, ym)?;
            // Nothing booked this month.
            if budget.is_zero() && actual.is_zero() {
                continue;
            }

            let v = Variance::between(budget, actual)?;
            rows.push(VarianceAnalysis {
                account_id: account_id.clone(),
                account_name: master.account_name(account_id),
                category: master.account_category(account_id),
                year_month: ym,
                budget_amount: v.budget,
                actual_amount: v.actual,
                variance_amount: v.amount,
                variance_rate: v.rounded_rate(),
                is_significant: v.is_significant(threshold),
            });
        }

        // Stable: ties keep grouping order.
        rows.sort_by(|a, b| b.variance_amount.abs().cmp(&a.variance_amount.abs()));
        Ok(rows)
    }
}

fn validate(
    budgets: &[Budget],
    actuals: &[Actual],
    year_month: &str,
) -> Result<YearMonth, AnalysisError> {
    let ym = YearMonth::parse(year_month).map_err(|_| {
        tracing::warn!(year_month, "Rejected variance analysis period");
        AnalysisError::InvalidYearMonthFormat(year_month.to_string())
    })?;
    if budgets.is_empty() && actuals.is_empty() {
        return Err(AnalysisError::NoDataAvailable);
    }
    Ok(ym)
}

fn month_total<T: LedgerRecord>(
    groups: &[(AccountId, Vec<&T>)],
    account_id: &AccountId,
    ym: YearMonth,
) -> Result<Decimal, AmountOverflow> {
    groups
        .iter()
        .find(|(id, _)| id == account_id)
        .map_or(Ok(Decimal::ZERO), |(_, items)| total_for_month(items.iter().copied(), ym))
}
