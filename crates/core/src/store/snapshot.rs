//! Serializable image of the whole store.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::StoreError;
use crate::actual::Actual;
use crate::budget::{Budget, BudgetVersion};
use crate::factor::{FactorForecast, FluctuationFactor};
use crate::master::{Account, Vendor};

/// Every record collection, as loaded from or written to JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    /// Accounts.
    pub accounts: Vec<Account>,
    /// Vendors.
    pub vendors: Vec<Vendor>,
    /// Fluctuation factors.
    pub factors: Vec<FluctuationFactor>,
    /// Factor forecasts.
    pub forecasts: Vec<FactorForecast>,
    /// Budget versions.
    pub versions: Vec<BudgetVersion>,
    /// Budget rows.
    pub budgets: Vec<Budget>,
    /// Imported actuals.
    pub actuals: Vec<Actual>,
}

impl Snapshot {
    /// Parses a snapshot from JSON text.
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a snapshot file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Serializes the snapshot as pretty JSON.
    pub fn to_json(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
