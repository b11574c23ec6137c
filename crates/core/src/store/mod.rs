//! In-memory persistence behind a repository interface.
//!
//! The store owns every record collection. Services never read it directly:
//! callers list what they need and pass the resulting slices in.

pub mod entity;
pub mod error;
pub mod repository;
pub mod snapshot;


use std::collections::HashSet;

use rust_decimal::Decimal;
use yojitsu_shared::types::amount::ensure_within_range;
use yojitsu_shared::types::{FactorId, VersionId, YearMonth};

use crate::actual::{Actual, ImportMode, ImportReport};
use crate::budget::{Budget, BudgetService, BudgetVersion};
use crate::factor::{FactorForecast, FluctuationFactor};
use crate::master::{Account, MasterData, Vendor};

pub use entity::Entity;
pub use error::StoreError;
pub use repository::{InMemoryRepository, Repository};
pub use snapshot::Snapshot;

/// One repository per record kind.
#[derive(Debug, Default)]
pub struct Store {
    /// Accounts.
    pub accounts: InMemoryRepository<Account>,
    /// Vendors.
    pub vendors: InMemoryRepository<Vendor>,
    /// Fluctuation factors.
    pub factors: InMemoryRepository<FluctuationFactor>,
    /// Factor forecasts.
    pub forecasts: InMemoryRepository<FactorForecast>,
    /// Budget versions.
    pub versions: InMemoryRepository<BudgetVersion>,
    /// Budget rows.
    pub budgets: InMemoryRepository<Budget>,
    /// Imported actuals.
    pub actuals: InMemoryRepository<Actual>,
}

impl Store {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from a snapshot.
    ///
    /// # Errors
    ///
    /// `DuplicateId` when two records of a kind share an ID,
    /// `DuplicateBudget` when two budgets occupy the same slot, and
    /// `AmountOutOfRange` for a budget or actual amount beyond the storable
    /// range.
    pub fn from_snapshot(snapshot: Snapshot) -> Result<Self, StoreError> {
        BudgetService::check_unique(&snapshot.budgets)?;
        check_amounts(&snapshot.budgets, |b| b.budget_amount)?;
        check_amounts(&snapshot.actuals, |a| a.amount)?;

        let store = Self::new();
        load(&store.accounts, snapshot.accounts)?;
        load(&store.vendors, snapshot.vendors)?;
        load(&store.factors, snapshot.factors)?;
        load(&store.forecasts, snapshot.forecasts)?;
        load(&store.versions, snapshot.versions)?;
        load(&store.budgets, snapshot.budgets)?;
        load(&store.actuals, snapshot.actuals)?;

        tracing::info!(
            accounts = store.accounts.len(),
            vendors = store.vendors.len(),
            factors = store.factors.len(),
            budgets = store.budgets.len(),
            actuals = store.actuals.len(),
            "Store loaded from snapshot"
        );

        Ok(store)
    }

    /// Copies every collection out.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            accounts: self.accounts.all(),
            vendors: self.vendors.all(),
            factors: self.factors.all(),
            forecasts: self.forecasts.all(),
            versions: self.versions.all(),
            budgets: self.budgets.all(),
            actuals: self.actuals.all(),
        }
    }

    /// Account and vendor lookup built from the current contents.
    #[must_use]
    pub fn master(&self) -> MasterData {
        MasterData::new(self.accounts.all(), self.vendors.all())
    }

    /// Budget rows of one version.
    #[must_use]
    pub fn budgets_for_version(&self, version_id: &VersionId) -> Vec<Budget> {
        self.budgets.list(&|b| &b.version_id == version_id)
    }

    /// Forecast rows of one factor.
    #[must_use]
    pub fn forecasts_for(&self, factor_id: &FactorId) -> Vec<FactorForecast> {
        self.forecasts.list(&|f| &f.factor_id == factor_id)
    }

    /// Writes the actuals of an import report.
    ///
    /// In replace mode the existing actuals of every month touched by the
    /// import are removed first. Returns the number of removed actuals.
    pub fn apply_import(&self, report: &ImportReport) -> usize {
        let removed = match report.mode {
            ImportMode::Append => 0,
            ImportMode::Replace => self.remove_actuals_for_months(&report.months()),
        };
        for actual in &report.imported {
            self.actuals.upsert(actual.clone());
        }

        tracing::info!(
            file_name = %report.file_name,
            mode = ?report.mode,
            inserted = report.imported.len(),
            removed,
            "Import applied"
        );

        removed
    }

    /// Removes the actuals booked to any of `months`.
    pub fn remove_actuals_for_months(&self, months: &[YearMonth]) -> usize {
        let months: HashSet<YearMonth> = months.iter().copied().collect();
        self.actuals.delete_where(|a| months.contains(&a.year_month))
    }
}

fn check_amounts<T: Entity>(records: &[T], amount: impl Fn(&T) -> Decimal) -> Result<(), StoreError> {
    for record in records {
        ensure_within_range(amount(record)).map_err(|source| StoreError::AmountOutOfRange {
            kind: T::KIND,
            id: record.id().to_string(),
            source,
        })?;
    }
    Ok(())
}

fn load<T: Entity>(repo: &InMemoryRepository<T>, records: Vec<T>) -> Result<(), StoreError> {
    for record in records {
        let id = record.id().to_string();
        if repo.upsert(record).is_some() {
            return Err(StoreError::DuplicateId { kind: T::KIND, id });
        }
    }
    Ok(())
}
