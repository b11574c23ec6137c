//! Budget routes.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    routing::get,
};
use chrono::Utc;
use serde::Deserialize;
use tracing::info;
use yojitsu_core::budget::{
    Budget, BudgetGridRow, BudgetInput, BudgetService, BudgetSummary, VersionService,
    build_budget_grid, summarize_budgets,
};
use yojitsu_core::record::GridShape;
use yojitsu_core::store::Repository;
use yojitsu_shared::types::{VersionId, YearMonth};

use super::{FiscalYearQuery, version_budgets};
use crate::AppState;
use crate::error::ApiResult;

/// Creates budget routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/budgets", get(list_budgets).post(upsert_budget))
        .route("/budgets/grid", get(get_grid))
        .route("/budgets/summary", get(get_summary))
}

/// `?version=&year_month=` query.
#[derive(Debug, Deserialize)]
pub struct BudgetListQuery {
    /// Budget version; defaults to the first stored version.
    pub version: Option<VersionId>,
    /// Month filter as `YYYYMM`.
    pub year_month: Option<String>,
}

/// GET `/budgets` - Budget rows of a version.
async fn list_budgets(
    State(state): State<AppState>,
    Query(query): Query<BudgetListQuery>,
) -> ApiResult<Json<Vec<Budget>>> {
    let mut budgets = version_budgets(&state.store, query.version.as_ref())?;
    if let Some(ym) = query.year_month.as_deref() {
        let ym = YearMonth::parse(ym)?;
        budgets.retain(|b| b.year_month == ym);
    }
    Ok(Json(budgets))
}

/// POST `/budgets` - Creates or replaces the row of an
/// (account, vendor, month, version) slot.
///
/// Factor-linked rows are recalculated; confirmed versions are read-only.
/// The version check, slot lookup and write happen under the budget write
/// lock.
async fn upsert_budget(
    State(state): State<AppState>,
    Json(input): Json<BudgetInput>,
) -> ApiResult<(StatusCode, Json<Budget>)> {
    let _guard = state.budget_writes.lock().await;
    let version = state.store.versions.require(&input.version_id)?;
    VersionService::ensure_editable(&version)?;

    let existing_rows = state.store.budgets_for_version(&version.id);
    let existing = BudgetService::find_slot(
        &existing_rows,
        &input.account_id,
        input.vendor_id.as_ref(),
        input.year_month,
        &version.id,
    );
    let created = existing.is_none();

    let budget = state.budgets.prepare(
        input,
        existing,
        &state.store.master(),
        &state.store.factors.all(),
        Utc::now(),
    )?;
    state.store.budgets.upsert(budget.clone());

    info!(
        budget_id = %budget.id,
        version_id = %budget.version_id,
        year_month = %budget.year_month,
        amount = %budget.budget_amount,
        created,
        "Budget saved"
    );

    let status = if created { StatusCode::CREATED } else { StatusCode::OK };
    Ok((status, Json(budget)))
}

/// GET `/budgets/grid` - Account by month budget grid.
async fn get_grid(
    State(state): State<AppState>,
    Query(query): Query<FiscalYearQuery>,
) -> ApiResult<Json<Vec<BudgetGridRow>>> {
    let fiscal_year = query.fiscal_year(&state)?;
    let budgets = version_budgets(&state.store, query.version.as_ref())?;
    let master = state.store.master();

    let shape = GridShape::from_master(fiscal_year, &master);
    Ok(Json(build_budget_grid(&budgets, &shape, &master)))
}

/// GET `/budgets/summary` - Totals of a fiscal year.
async fn get_summary(
    State(state): State<AppState>,
    Query(query): Query<FiscalYearQuery>,
) -> ApiResult<Json<BudgetSummary>> {
    let fiscal_year = query.fiscal_year(&state)?;
    let budgets = version_budgets(&state.store, query.version.as_ref())?;

    Ok(Json(summarize_budgets(&budgets, &fiscal_year, &state.store.master())))
}
