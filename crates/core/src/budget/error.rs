//! Budget error types.

use rust_decimal::Decimal;
use thiserror::Error;
use yojitsu_shared::AppError;
use yojitsu_shared::types::{AccountId, AmountOverflow, FactorId, VendorId, VersionId, YearMonth};

use crate::factor::CalculationError;

/// Budget-related errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BudgetError {
    /// A row already exists for the same account, vendor, month and version.
    #[error(
        "Budget already exists for {account_id}/{} in {year_month} ({version_id})",
        .vendor_id.as_ref().map_or("-", VendorId::as_str)
    )]
    DuplicateBudget {
        /// Account ID.
        account_id: AccountId,
        /// Vendor ID.
        vendor_id: Option<VendorId>,
        /// Month.
        year_month: YearMonth,
        /// Version ID.
        version_id: VersionId,
    },

    /// Factor-linked input without a factor or basis value.
    #[error("Factor-linked budget requires linked_factor_id and basis_value")]
    MissingFactorLink,

    /// Linked factor does not exist.
    #[error("Factor not found: {0}")]
    FactorNotFound(FactorId),

    /// Account does not exist.
    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),

    /// Vendor does not exist.
    #[error("Vendor not found: {0}")]
    VendorNotFound(VendorId),

    /// Manual amount has a fractional part.
    #[error("Budget amount must be a whole currency amount: {0}")]
    FractionalAmount(Decimal),

    /// Amount is outside the storable range.
    #[error(transparent)]
    AmountOverflow(#[from] AmountOverflow),

    /// Factor-linked amount could not be calculated.
    #[error(transparent)]
    Calculation(#[from] CalculationError),
}

/// Version lifecycle errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionError {
    /// Version not found.
    #[error("Budget version not found: {0}")]
    NotFound(VersionId),

    /// Confirmed versions are read-only.
    #[error("Budget version is confirmed and cannot be modified: {0}")]
    VersionConfirmed(VersionId),

    /// Version is already confirmed.
    #[error("Budget version is already confirmed: {0}")]
    AlreadyConfirmed(VersionId),

    /// Version name is blank.
    #[error("Budget version name must not be empty")]
    EmptyName,
}

impl From<BudgetError> for AppError {
    fn from(e: BudgetError) -> Self {
        match e {
            BudgetError::DuplicateBudget { .. } => Self::Conflict(e.to_string()),
            BudgetError::FactorNotFound(_)
            | BudgetError::AccountNotFound(_)
            | BudgetError::VendorNotFound(_) => Self::NotFound(e.to_string()),
            BudgetError::Calculation(inner) => inner.into(),
            BudgetError::MissingFactorLink
            | BudgetError::FractionalAmount(_)
            | BudgetError::AmountOverflow(_) => Self::Validation(e.to_string()),
        }
    }
}

impl From<VersionError> for AppError {
    fn from(e: VersionError) -> Self {
        match e {
            VersionError::NotFound(_) => Self::NotFound(e.to_string()),
            VersionError::VersionConfirmed(_) | VersionError::AlreadyConfirmed(_) => {
                Self::Conflict(e.to_string())
            }
            VersionError::EmptyName => Self::Validation(e.to_string()),
        }
    }
}
