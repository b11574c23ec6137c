//! Router fixtures for handler tests.

use std::sync::Arc;

use axum::{
    Router,
    body::{Body, Bytes},
    http::{HeaderMap, Request, StatusCode},
};
use http_body_util::BodyExt;
use rust_decimal::Decimal;
use serde_json::Value;
use tower::ServiceExt;
use yojitsu_core::store::{Snapshot, Store};
use yojitsu_shared::AppConfig;
use yojitsu_shared::telemetry::NoopMonitor;

use crate::{AppState, create_router};

const SEED: &str = r#"{
    "accounts": [
        { "id": "acc_002", "code": "6100", "name": "Salaries", "category": "selling_admin", "display_order": 2 },
        { "id": "acc_001", "code": "5100", "name": "Outsourcing", "category": "cost_of_sales", "display_order": 1 }
    ],
    "vendors": [
        { "id": "vnd_001", "code": "V001", "name": "Alpha Co." }
    ],
    "factors": [
        { "id": "fact_001", "name": "Headcount", "factor_type": "headcount", "unit": "people", "is_active": true },
        { "id": "fact_002", "name": "Revenue", "factor_type": "revenue", "is_active": false }
    ],
    "forecasts": [
        { "id": "ff_001", "factor_id": "fact_001", "year_month": "202404", "forecast_value": "45" },
        { "id": "ff_002", "factor_id": "fact_001", "year_month": "202405", "forecast_value": "46" }
    ],
    "versions": [
        { "id": "ver_normal", "name": "Normal" },
        { "id": "ver_final", "name": "Final", "is_confirmed": true, "confirmed_by": "user_001", "confirmed_at": "2024-03-31T00:00:00Z" }
    ],
    "budgets": [
        {
            "id": "bud_001", "account_id": "acc_001", "vendor_id": "vnd_001", "year_month": "202404",
            "budget_amount": "800000", "version_id": "ver_normal",
            "created_at": "2024-03-01T09:00:00Z", "updated_at": "2024-03-01T09:00:00Z"
        },
        {
            "id": "bud_002", "account_id": "acc_002", "year_month": "202404",
            "budget_amount": "500000", "version_id": "ver_normal",
            "created_at": "2024-03-01T09:00:00Z", "updated_at": "2024-03-01T09:00:00Z"
        },
        {
            "id": "bud_003", "account_id": "acc_001", "vendor_id": "vnd_001", "year_month": "202404",
            "budget_amount": "900000", "version_id": "ver_final",
            "created_at": "2024-03-01T09:00:00Z", "updated_at": "2024-03-01T09:00:00Z"
        }
    ],
    "actuals": [
        {
            "id": "act_001", "account_id": "acc_001", "vendor_id": "vnd_001",
            "transaction_date": "2024-04-15", "amount": "750000"
        },
        {
            "id": "act_002", "account_id": "acc_002", "transaction_date": "2024-04-20", "amount": "560000"
        }
    ]
}"#;

pub fn test_state() -> AppState {
    let store = Store::from_snapshot(Snapshot::from_json(SEED).unwrap()).unwrap();
    AppState::new(store, &AppConfig::default(), Arc::new(NoopMonitor))
}

pub fn test_app() -> Router {
    create_router(test_state())
}

pub async fn send_raw(
    app: Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, HeaderMap, Bytes) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            request = request.header("Content-Type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app.oneshot(request.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, headers, bytes)
}

pub async fn send(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let (status, _, bytes) = send_raw(app, method, uri, body).await;
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

pub async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    send(app, "GET", uri, None).await
}

pub async fn post(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, "POST", uri, Some(body)).await
}

/// Reads a decimal serialized as a JSON string.
pub fn dec_at(value: &Value) -> Decimal {
    value.as_str().unwrap().parse().unwrap()
}
