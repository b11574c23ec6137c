//! Actual routes.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::{get, post},
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use yojitsu_core::actual::{
    Actual, ActualGridRow, ActualImportRow, ActualSummary, ImportMode, ImportReport,
    VendorActualSummary, aggregate_by_vendor, build_actual_grid, summarize_actuals,
};
use yojitsu_core::record::GridShape;
use yojitsu_core::store::Repository;
use yojitsu_shared::types::{FiscalYear, YearMonth};

use crate::AppState;
use crate::error::ApiResult;

/// Creates actual routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/actuals", get(list_actuals))
        .route("/actuals/import", post(import_actuals))
        .route("/actuals/grid", get(get_grid))
        .route("/actuals/vendors", get(get_vendors))
        .route("/actuals/summary", get(get_summary))
}

/// `?year_month=` query.
#[derive(Debug, Deserialize)]
pub struct ActualListQuery {
    /// Month filter as `YYYYMM`.
    pub year_month: Option<String>,
}

/// `?fiscal_year=` query.
#[derive(Debug, Deserialize)]
pub struct ActualFiscalYearQuery {
    /// Starting calendar year of the fiscal year.
    pub fiscal_year: i32,
}

/// Request body for an import.
#[derive(Debug, Deserialize)]
pub struct ImportRequest {
    /// Source file name.
    pub file_name: String,
    /// Append or replace the imported months.
    #[serde(default)]
    pub mode: ImportMode,
    /// Parsed rows.
    pub rows: Vec<ActualImportRow>,
}

/// Response for an import.
#[derive(Debug, Serialize)]
pub struct ImportResponse {
    /// Validation report.
    #[serde(flatten)]
    pub report: ImportReport,
    /// Existing actuals removed by a replace import.
    pub removed_rows: usize,
}

/// GET `/actuals` - Actuals, optionally for one month.
async fn list_actuals(
    State(state): State<AppState>,
    Query(query): Query<ActualListQuery>,
) -> ApiResult<Json<Vec<Actual>>> {
    let actuals = match query.year_month.as_deref() {
        Some(ym) => {
            let ym = YearMonth::parse(ym)?;
            state.store.actuals.list(&|a| a.year_month == ym)
        }
        None => state.store.actuals.all(),
    };
    Ok(Json(actuals))
}

/// POST `/actuals/import` - Validates rows and stores the valid ones.
async fn import_actuals(
    State(state): State<AppState>,
    Json(payload): Json<ImportRequest>,
) -> ApiResult<Json<ImportResponse>> {
    let report = state.importer.import(
        &state.store.master(),
        payload.rows,
        &payload.file_name,
        Utc::now(),
        payload.mode,
    )?;
    let removed_rows = state.store.apply_import(&report);

    Ok(Json(ImportResponse {
        report,
        removed_rows,
    }))
}

/// GET `/actuals/grid` - Account and vendor by month actual grid.
async fn get_grid(
    State(state): State<AppState>,
    Query(query): Query<ActualFiscalYearQuery>,
) -> ApiResult<Json<Vec<ActualGridRow>>> {
    let fiscal_year = FiscalYear::new(query.fiscal_year, state.fiscal_start_month)?;
    let master = state.store.master();

    let shape = GridShape::from_master(fiscal_year, &master);
    Ok(Json(build_actual_grid(&state.store.actuals.all(), &shape, &master)))
}

/// GET `/actuals/vendors` - Actuals aggregated per vendor.
async fn get_vendors(State(state): State<AppState>) -> Json<Vec<VendorActualSummary>> {
    Json(aggregate_by_vendor(&state.store.actuals.all(), &state.store.master()))
}

/// GET `/actuals/summary` - Totals of a fiscal year.
async fn get_summary(
    State(state): State<AppState>,
    Query(query): Query<ActualFiscalYearQuery>,
) -> ApiResult<Json<ActualSummary>> {
    let fiscal_year = FiscalYear::new(query.fiscal_year, state.fiscal_start_month)?;

    Ok(Json(summarize_actuals(
        &state.store.actuals.all(),
        &fiscal_year,
        &state.store.master(),
    )))
}
