//! Currency amount range and overflow-checked arithmetic.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! `Decimal`'s operators panic on overflow, so totals and rates derived from
//! caller-supplied amounts go through the checked helpers here.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::error::AppError;

/// Largest accepted magnitude of a stored amount: 10^15 currency units.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xA4C6_8000, 0x0003_8D7E, 0, false, 0);

/// An amount, or a value derived from amounts, is outside the supported range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Amount exceeds the supported range (absolute value at most 10^15)")]
pub struct AmountOverflow;

impl From<AmountOverflow> for AppError {
    fn from(e: AmountOverflow) -> Self {
        Self::Validation(e.to_string())
    }
}

/// Returns `amount` if its magnitude is at most [`MAX_AMOUNT`].
pub fn ensure_within_range(amount: Decimal) -> Result<Decimal, AmountOverflow> {
    if amount.abs() <= MAX_AMOUNT {
        Ok(amount)
    } else {
        Err(AmountOverflow)
    }
}

/// `a + b`.
pub fn checked_add(a: Decimal, b: Decimal) -> Result<Decimal, AmountOverflow> {
    a.checked_add(b).ok_or(AmountOverflow)
}

/// `a - b`.
pub fn checked_sub(a: Decimal, b: Decimal) -> Result<Decimal, AmountOverflow> {
    a.checked_sub(b).ok_or(AmountOverflow)
}

/// `a × b`.
pub fn checked_mul(a: Decimal, b: Decimal) -> Result<Decimal, AmountOverflow> {
    a.checked_mul(b).ok_or(AmountOverflow)
}

/// `a / b`. Division by zero also reports `AmountOverflow`; callers handle a
/// zero divisor before dividing.
pub fn checked_div(a: Decimal, b: Decimal) -> Result<Decimal, AmountOverflow> {
    a.checked_div(b).ok_or(AmountOverflow)
}

/// Sums amounts.
pub fn checked_sum<I>(amounts: I) -> Result<Decimal, AmountOverflow>
where
    I: IntoIterator<Item = Decimal>,
{
    amounts
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, amount| checked_add(acc, amount))
}

/// `part / whole × 100`, or zero when `whole` is zero.
pub fn checked_percent(part: Decimal, whole: Decimal) -> Result<Decimal, AmountOverflow> {
    if whole.is_zero() {
        return Ok(Decimal::ZERO);
    }
    checked_mul(checked_div(part, whole)?, Decimal::ONE_HUNDRED)
}
