//! Budget service for row preparation and validation.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use yojitsu_shared::types::amount::ensure_within_range;
use yojitsu_shared::types::{AccountId, BudgetId, VendorId, VersionId, YearMonth};

use super::error::BudgetError;
use super::types::{Budget, BudgetInput, CalculationType};
use crate::factor::{CalculationEngine, FluctuationFactor};
use crate::master::MasterData;

/// Budget service for business logic.
#[derive(Debug, Clone)]
pub struct BudgetService {
    engine: CalculationEngine,
}

impl BudgetService {
    /// Creates a service using `engine` for factor-linked amounts.
    #[must_use]
    pub const fn new(engine: CalculationEngine) -> Self {
        Self { engine }
    }

    /// Turns an input into a budget row ready to be stored.
    ///
    /// Manual rows keep the given amount, which must be a whole currency
    /// amount. Factor-linked rows are recomputed through the calculation
    /// engine and rounded to whole currency units. When `existing` is given
    /// its identity and creation stamp are kept.
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` or `VendorNotFound` for an unknown account or
    /// vendor, `FractionalAmount` for a manual amount with a fractional part,
    /// `AmountOverflow` for a manual amount beyond the storable range,
    /// `MissingFactorLink` when a factor-linked input lacks its factor or
    /// basis value, `FactorNotFound` for an unknown factor, and `Calculation`
    /// when the engine rejects the input.
    pub fn prepare(
        &self,
        input: BudgetInput,
        existing: Option<&Budget>,
        master: &MasterData,
        factors: &[FluctuationFactor],
        now: DateTime<Utc>,
    ) -> Result<Budget, BudgetError> {
        if master.account(&input.account_id).is_none() {
            return Err(BudgetError::AccountNotFound(input.account_id));
        }
        if let Some(vendor_id) = input.vendor_id.as_ref().filter(|v| master.vendor(v).is_none()) {
            return Err(BudgetError::VendorNotFound(vendor_id.clone()));
        }

        let (budget_amount, linked_factor_id, basis_value) = match input.calculation_type {
            CalculationType::Manual => {
                let amount = ensure_within_range(input.budget_amount)?;
                if !amount.fract().is_zero() {
                    return Err(BudgetError::FractionalAmount(amount));
                }
                (amount.normalize(), None, None)
            }
            CalculationType::FactorLinked => {
                let (Some(factor_id), Some(basis_value)) =
                    (input.linked_factor_id, input.basis_value)
                else {
                    return Err(BudgetError::MissingFactorLink);
                };
                let factor = factors
                    .iter()
                    .find(|f| f.id == factor_id)
                    .ok_or_else(|| BudgetError::FactorNotFound(factor_id.clone()))?;
                let amount = self.engine.calculate_amount(
                    factor,
                    basis_value,
                    &input.year_month.to_string(),
                )?;
                (round_to_units(amount), Some(factor_id), Some(basis_value))
            }
        };

        let budget = Budget {
            id: existing.map_or_else(BudgetId::generate, |b| b.id.clone()),
            account_id: input.account_id,
            vendor_id: input.vendor_id,
            year_month: input.year_month,
            budget_amount,
            version_id: input.version_id,
            calculation_type: input.calculation_type,
            linked_factor_id,
            basis_value,
            created_by: existing.map_or(input.user_id, |b| b.created_by.clone()),
            created_at: existing.map_or(now, |b| b.created_at),
            updated_at: now,
        };

        tracing::debug!(
            budget_id = %budget.id,
            account_id = %budget.account_id,
            year_month = %budget.year_month,
            calculation_type = ?budget.calculation_type,
            amount = %budget.budget_amount,
            "Budget row prepared"
        );

        Ok(budget)
    }

    /// Finds the row occupying an (account, vendor, month, version) slot.
    #[must_use]
    pub fn find_slot<'a>(
        budgets: &'a [Budget],
        account_id: &AccountId,
        vendor_id: Option<&VendorId>,
        year_month: YearMonth,
        version_id: &VersionId,
    ) -> Option<&'a Budget> {
        budgets.iter().find(|b| {
            &b.account_id == account_id
                && b.vendor_id.as_ref() == vendor_id
                && b.year_month == year_month
                && &b.version_id == version_id
        })
    }

    /// Checks that no two rows share an (account, vendor, month, version) slot.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateBudget` for the first repeated slot.
    pub fn check_unique(budgets: &[Budget]) -> Result<(), BudgetError> {
        let mut seen = HashSet::with_capacity(budgets.len());
        for b in budgets {
            if !seen.insert((&b.account_id, b.vendor_id.as_ref(), b.year_month, &b.version_id)) {
                return Err(BudgetError::DuplicateBudget {
                    account_id: b.account_id.clone(),
                    vendor_id: b.vendor_id.clone(),
                    year_month: b.year_month,
                    version_id: b.version_id.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Rounds to whole currency units, halves away from zero.
#[must_use]
pub fn round_to_units(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}
