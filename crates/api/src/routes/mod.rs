//! API route definitions.

use axum::Router;
use serde::Deserialize;
use yojitsu_core::budget::Budget;
use yojitsu_core::store::{Repository, Store};
use yojitsu_shared::types::{FiscalYear, VersionId};

use crate::AppState;
use crate::error::ApiResult;

pub mod actuals;
pub mod analysis;
pub mod budgets;
pub mod export;
pub mod factors;
pub mod health;
pub mod master;
pub mod versions;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(master::routes())
        .merge(factors::routes())
        .merge(budgets::routes())
        .merge(versions::routes())
        .merge(actuals::routes())
        .merge(analysis::routes())
        .merge(export::routes())
}

/// `?fiscal_year=&version=` query.
#[derive(Debug, Deserialize)]
pub struct FiscalYearQuery {
    /// Starting calendar year of the fiscal year.
    pub fiscal_year: i32,
    /// Budget version; defaults to the first stored version.
    pub version: Option<VersionId>,
}

impl FiscalYearQuery {
    pub(crate) fn fiscal_year(&self, state: &AppState) -> ApiResult<FiscalYear> {
        Ok(FiscalYear::new(self.fiscal_year, state.fiscal_start_month)?)
    }
}

/// Budgets of the requested version.
///
/// Without a version the first stored version is used; with no versions at
/// all every budget row is returned.
pub(crate) fn version_budgets(store: &Store, version: Option<&VersionId>) -> ApiResult<Vec<Budget>> {
    if let Some(id) = version {
        store.versions.require(id)?;
        return Ok(store.budgets_for_version(id));
    }
    match store.versions.all().into_iter().next() {
        Some(first) => Ok(store.budgets_for_version(&first.id)),
        None => Ok(store.budgets.all()),
    }
}
