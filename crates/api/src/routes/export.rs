//! Report export route.

use axum::{
    Json, Router,
    extract::State,
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::{IntoResponse, Response},
    routing::post,
};
use serde::Deserialize;
use yojitsu_core::export::ExportOptions;
use yojitsu_core::store::Repository;
use yojitsu_shared::types::VersionId;

use super::version_budgets;
use crate::AppState;
use crate::error::ApiResult;

/// Creates export routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/export", post(export_report))
}

/// Request body for an export.
#[derive(Debug, Deserialize)]
pub struct ExportRequest {
    /// Report options.
    #[serde(flatten)]
    pub options: ExportOptions,
    /// Budget version; defaults to the first stored version.
    pub version: Option<VersionId>,
}

/// POST `/export` - Renders a report file.
async fn export_report(
    State(state): State<AppState>,
    Json(payload): Json<ExportRequest>,
) -> ApiResult<Response> {
    let budgets = version_budgets(&state.store, payload.version.as_ref())?;
    let file = state.exporter.export_report(
        &state.store.master(),
        &budgets,
        &state.store.actuals.all(),
        &payload.options,
    )?;

    let disposition = format!("attachment; filename=\"{}\"", file.file_name);
    Ok((
        [
            (CONTENT_TYPE, file.content_type.to_string()),
            (CONTENT_DISPOSITION, disposition),
        ],
        file.bytes,
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use axum::http::{StatusCode, header};
    use serde_json::json;

    use crate::test_support::{send, send_raw, test_app};

    #[tokio::test]
    async fn test_csv_export() {
        let (status, headers, bytes) = send_raw(
            test_app(),
            "POST",
            "/api/v1/export",
            Some(json!({ "start_month": "202404", "end_month": "202503", "format": "csv" })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(headers[header::CONTENT_TYPE].to_str().unwrap().starts_with("text/csv"));
        assert_eq!(
            headers[header::CONTENT_DISPOSITION].to_str().unwrap(),
            "attachment; filename=\"budget_report_202404_202503.csv\""
        );
        let text = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(text.starts_with("Monthly Comparison"));
        assert!(text.contains("202404,1300000,1310000,10000,"));
    }

    #[tokio::test]
    async fn test_excel_export() {
        let (status, _, bytes) = send_raw(
            test_app(),
            "POST",
            "/api/v1/export",
            Some(json!({
                "start_month": "202404",
                "end_month": "202404",
                "account_categories": ["cost_of_sales"],
                "format": "excel",
                "version": "ver_final"
            })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(&bytes[..2], b"PK");
    }

    #[tokio::test]
    async fn test_pdf_not_implemented() {
        let (status, body) = send(
            test_app(),
            "POST",
            "/api/v1/export",
            Some(json!({ "start_month": "202404", "end_month": "202503", "format": "pdf" })),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_IMPLEMENTED);
        assert_eq!(body["error"], "NOT_IMPLEMENTED");
    }
}
