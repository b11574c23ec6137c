//! Fluctuation factor routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use yojitsu_core::factor::{FactorCalculation, FactorForecastGrid, FluctuationFactor, forecast_grid};
use yojitsu_core::store::Repository;
use yojitsu_shared::types::{FactorId, FiscalYear};

use crate::AppState;
use crate::error::ApiResult;

/// Creates factor routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/factors", get(list_factors))
        .route("/factors/{id}/forecasts", get(get_forecasts))
        .route("/factors/{id}/calculate", post(calculate))
}

/// `?fiscal_year=` query.
#[derive(Debug, Deserialize)]
pub struct ForecastQuery {
    /// Starting calendar year of the fiscal year.
    pub fiscal_year: i32,
}

/// Request body for a factor-linked calculation.
#[derive(Debug, Deserialize)]
pub struct CalculateRequest {
    /// Driver value applied to every month. When absent, each month uses
    /// its stored forecast.
    pub basis_value: Option<Decimal>,
    /// Months to calculate, as `YYYYMM`.
    pub target_months: Vec<String>,
}

/// GET `/factors` - All factors.
async fn list_factors(State(state): State<AppState>) -> Json<Vec<FluctuationFactor>> {
    Json(state.store.factors.all())
}

/// GET `/factors/{id}/forecasts` - Forecast grid for one fiscal year.
async fn get_forecasts(
    State(state): State<AppState>,
    Path(id): Path<FactorId>,
    Query(query): Query<ForecastQuery>,
) -> ApiResult<Json<FactorForecastGrid>> {
    let factor = state.store.factors.require(&id)?;
    let fiscal_year = FiscalYear::new(query.fiscal_year, state.fiscal_start_month)?;
    let forecasts = state.store.forecasts_for(&id);

    Ok(Json(forecast_grid(&factor, &forecasts, &fiscal_year)?))
}

/// POST `/factors/{id}/calculate` - Budget amounts driven by a factor.
async fn calculate(
    State(state): State<AppState>,
    Path(id): Path<FactorId>,
    Json(payload): Json<CalculateRequest>,
) -> ApiResult<Json<FactorCalculation>> {
    let factor = state.store.factors.require(&id)?;

    let calculation = match payload.basis_value {
        Some(basis) => state
            .engine
            .calculate_budget(&factor, basis, &payload.target_months)?,
        None => state.engine.calculate_from_forecasts(
            &factor,
            &state.store.forecasts_for(&id),
            &payload.target_months,
        )?,
    };

    Ok(Json(calculation))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use rust_decimal_macros::dec;
    use serde_json::json;

    use crate::test_support::{dec_at, get, post, test_app};

    #[tokio::test]
    async fn test_list_factors() {
        let (status, body) = get(test_app(), "/api/v1/factors").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 2);
        assert_eq!(body[0]["factor_type"], "headcount");
    }

    #[tokio::test]
    async fn test_forecast_grid() {
        let (status, body) = get(test_app(), "/api/v1/factors/fact_001/forecasts?fiscal_year=2024").await;

        assert_eq!(status, StatusCode::OK);
        let months = body["monthly_forecasts"].as_array().unwrap();
        assert_eq!(months.len(), 12);
        assert_eq!(months[0]["year_month"], "202404");
        assert_eq!(months[2]["is_estimated"], true);
        assert_eq!(dec_at(&body["annual_average"]), dec!(45.5));
    }

    #[tokio::test]
    async fn test_calculate_with_basis() {
        let (status, body) = post(
            test_app(),
            "/api/v1/factors/fact_001/calculate",
            json!({ "basis_value": "45", "target_months": ["202404", "202405"] }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["monthly_amounts"].as_array().unwrap().len(), 2);
        assert_eq!(dec_at(&body["total_amount"]), dec!(4050000));
    }

    #[tokio::test]
    async fn test_calculate_from_forecasts() {
        let (status, body) = post(
            test_app(),
            "/api/v1/factors/fact_001/calculate",
            json!({ "target_months": ["202404", "202405"] }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(dec_at(&body["total_amount"]), dec!(4095000));
    }

    #[tokio::test]
    async fn test_calculate_huge_basis_is_rejected() {
        let (status, body) = post(
            test_app(),
            "/api/v1/factors/fact_001/calculate",
            json!({ "basis_value": "10000000000000000000000000", "target_months": ["202404"] }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_calculate_rejections() {
        let (status, body) = post(
            test_app(),
            "/api/v1/factors/fact_001/calculate",
            json!({ "target_months": ["202406"] }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "VALIDATION_ERROR");

        let (status, _) = post(
            test_app(),
            "/api/v1/factors/fact_002/calculate",
            json!({ "basis_value": "1000", "target_months": ["202404"] }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = post(
            test_app(),
            "/api/v1/factors/fact_999/calculate",
            json!({ "basis_value": "1", "target_months": ["202404"] }),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
