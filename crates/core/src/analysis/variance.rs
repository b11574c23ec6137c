//! Budget versus actual arithmetic.

use rust_decimal::Decimal;
use yojitsu_shared::types::AmountOverflow;
use yojitsu_shared::types::amount::{checked_percent, checked_sub};

/// Variance between a budgeted and an actual amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Variance {
    /// Budgeted amount.
    pub budget: Decimal,
    /// Actual amount.
    pub actual: Decimal,
    /// Actual minus budget.
    pub amount: Decimal,
    /// Unrounded variance rate in percent. Zero when the budget is zero.
    pub rate: Decimal,
    /// Unrounded actual over budget in percent. Zero when the budget is zero.
    pub achievement: Decimal,
}

impl Variance {
    /// Compares an actual amount with its budget.
    ///
    /// # Errors
    ///
    /// Returns `AmountOverflow` when the difference or a rate is not
    /// representable.
    pub fn between(budget: Decimal, actual: Decimal) -> Result<Self, AmountOverflow> {
        let amount = checked_sub(actual, budget)?;
        Ok(Self {
            budget,
            actual,
            amount,
            rate: checked_percent(amount, budget)?,
            achievement: checked_percent(actual, budget)?,
        })
    }

    /// Rate rounded to 2 decimal places for output.
    #[must_use]
    pub fn rounded_rate(&self) -> Decimal {
        self.rate.round_dp(2)
    }

    /// Actual over budget in percent, 2 dp. Zero when the budget is zero.
    #[must_use]
    pub fn achievement_rate(&self) -> Decimal {
        self.achievement.round_dp(2)
    }

    /// Whether the unrounded absolute rate reaches `threshold` percent.
    #[must_use]
    pub fn is_significant(&self, threshold: Decimal) -> bool {
        self.rate.abs() >= threshold
    }
}
