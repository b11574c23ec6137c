//! Budget versus actual analysis routes.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use serde::Deserialize;
use yojitsu_core::analysis::{FiscalYearAnalysis, KpiAnalysis, VarianceAnalysis};
use yojitsu_core::store::Repository;
use yojitsu_shared::types::VersionId;

use super::{FiscalYearQuery, version_budgets};
use crate::AppState;
use crate::error::ApiResult;

/// Creates analysis routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/analysis/variance", get(get_variance))
        .route("/analysis/kpi", get(get_kpi))
        .route("/analysis/fiscal-year", get(get_fiscal_year))
}

/// `?year_month=&version=` query.
#[derive(Debug, Deserialize)]
pub struct PeriodQuery {
    /// Month as `YYYYMM`.
    pub year_month: String,
    /// Budget version; defaults to the first stored version.
    pub version: Option<VersionId>,
}

/// GET `/analysis/variance` - Per-account variance for one month.
async fn get_variance(
    State(state): State<AppState>,
    Query(query): Query<PeriodQuery>,
) -> ApiResult<Json<Vec<VarianceAnalysis>>> {
    let budgets = version_budgets(&state.store, query.version.as_ref())?;
    let rows = state.analyzer.analyze_variance(
        &state.store.master(),
        &budgets,
        &state.store.actuals.all(),
        &query.year_month,
    )?;
    Ok(Json(rows))
}

/// GET `/analysis/kpi` - Period KPIs for one month.
async fn get_kpi(
    State(state): State<AppState>,
    Query(query): Query<PeriodQuery>,
) -> ApiResult<Json<KpiAnalysis>> {
    let budgets = version_budgets(&state.store, query.version.as_ref())?;
    let kpi = state.analyzer.analyze_kpi(
        &state.store.master(),
        &budgets,
        &state.store.actuals.all(),
        &query.year_month,
    )?;
    Ok(Json(kpi))
}

/// GET `/analysis/fiscal-year` - Month-by-month comparison.
async fn get_fiscal_year(
    State(state): State<AppState>,
    Query(query): Query<FiscalYearQuery>,
) -> ApiResult<Json<FiscalYearAnalysis>> {
    let fiscal_year = query.fiscal_year(&state)?;
    let budgets = version_budgets(&state.store, query.version.as_ref())?;

    let analysis = state.analyzer.analyze_fiscal_year(
        &budgets,
        &state.store.actuals.all(),
        &fiscal_year,
    )?;
    Ok(Json(analysis))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use rust_decimal_macros::dec;

    use crate::test_support::{dec_at, get, test_app};

    #[tokio::test]
    async fn test_variance_sorted_by_magnitude() {
        let (status, body) = get(test_app(), "/api/v1/analysis/variance?year_month=202404").await;

        assert_eq!(status, StatusCode::OK);
        let rows = body.as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["account_id"], "acc_002");
        assert_eq!(dec_at(&rows[0]["variance_amount"]), dec!(60000));
        assert_eq!(dec_at(&rows[0]["variance_rate"]), dec!(12));
        assert_eq!(rows[0]["is_significant"], true);
        assert_eq!(dec_at(&rows[1]["variance_rate"]), dec!(-6.25));
        assert_eq!(rows[1]["is_significant"], false);
    }

    #[tokio::test]
    async fn test_variance_against_confirmed_version() {
        let (status, body) = get(
            test_app(),
            "/api/v1/analysis/variance?year_month=202404&version=ver_final",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let acc_001 = body
            .as_array()
            .unwrap()
            .iter()
            .find(|r| r["account_id"] == "acc_001")
            .unwrap();
        assert_eq!(dec_at(&acc_001["budget_amount"]), dec!(900000));
    }

    #[tokio::test]
    async fn test_invalid_period() {
        let (status, body) = get(test_app(), "/api/v1/analysis/variance?year_month=2024-04").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_kpi() {
        let (status, body) = get(test_app(), "/api/v1/analysis/kpi?year_month=202404").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(dec_at(&body["total_budget"]), dec!(1300000));
        assert_eq!(dec_at(&body["total_actual"]), dec!(1310000));
        assert_eq!(dec_at(&body["total_variance"]), dec!(10000));
        assert_eq!(dec_at(&body["cost_of_sales_variance"]), dec!(-50000));
        assert_eq!(body["significant_variances"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_fiscal_year() {
        let (status, body) = get(test_app(), "/api/v1/analysis/fiscal-year?fiscal_year=2024").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["monthly"].as_array().unwrap().len(), 12);
        assert_eq!(dec_at(&body["total_variance"]), dec!(10000));
        assert!(body["significant_months"].as_array().unwrap().is_empty());
    }
}
