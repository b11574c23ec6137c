//! Identity of stored records.

use std::hash::Hash;

use yojitsu_shared::types::{
    AccountId, ActualId, BudgetId, FactorId, ForecastId, VendorId, VersionId,
};

use crate::actual::Actual;
use crate::budget::{Budget, BudgetVersion};
use crate::factor::{FactorForecast, FluctuationFactor};
use crate::master::{Account, Vendor};

/// A record addressable by a unique ID.
pub trait Entity: Clone + std::fmt::Debug + Send + Sync + 'static {
    /// ID type.
    type Id: Clone + Eq + Hash + std::fmt::Debug + std::fmt::Display + Send + Sync + 'static;

    /// Entity name used in errors and logs.
    const KIND: &'static str;

    /// The record's ID.
    fn id(&self) -> &Self::Id;
}

macro_rules! entity {
    ($ty:ty, $id:ty, $kind:literal) => {
        impl Entity for $ty {
            type Id = $id;
            const KIND: &'static str = $kind;

            fn id(&self) -> &Self::Id {
                &self.id
            }
        }
    };
}

entity!(Account, AccountId, "account");
entity!(Vendor, VendorId, "vendor");
entity!(FluctuationFactor, FactorId, "factor");
entity!(FactorForecast, ForecastId, "forecast");
entity!(Budget, BudgetId, "budget");
entity!(Actual, ActualId, "actual");
entity!(BudgetVersion, VersionId, "version");
