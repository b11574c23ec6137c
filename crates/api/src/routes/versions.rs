//! Budget version lifecycle routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use yojitsu_core::budget::{BudgetVersion, VersionService};
use yojitsu_core::store::Repository;
use yojitsu_shared::types::{UserId, VersionId};

use crate::AppState;
use crate::error::ApiResult;

/// Creates version routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/versions", get(list_versions))
        .route("/versions/{id}/confirm", post(confirm_version))
        .route("/versions/{id}/fork", post(fork_version))
}

/// Request body for confirming a version.
#[derive(Debug, Deserialize)]
pub struct ConfirmRequest {
    /// Confirming user.
    pub user_id: UserId,
}

/// Request body for forking a version.
#[derive(Debug, Deserialize)]
pub struct ForkRequest {
    /// Name of the new version.
    pub name: String,
    /// Acting user.
    pub user_id: Option<UserId>,
}

/// Response for a fork.
#[derive(Debug, Serialize)]
pub struct ForkResponse {
    /// The new version.
    pub version: BudgetVersion,
    /// Number of budget rows copied into it.
    pub budgets_copied: usize,
}

/// GET `/versions` - All versions.
async fn list_versions(State(state): State<AppState>) -> Json<Vec<BudgetVersion>> {
    Json(state.store.versions.all())
}

/// POST `/versions/{id}/confirm` - Freezes a version.
async fn confirm_version(
    State(state): State<AppState>,
    Path(id): Path<VersionId>,
    Json(payload): Json<ConfirmRequest>,
) -> ApiResult<Json<BudgetVersion>> {
    let _guard = state.budget_writes.lock().await;
    let version = state.store.versions.require(&id)?;
    let confirmed = VersionService::confirm(&version, &payload.user_id, Utc::now())?;
    state.store.versions.upsert(confirmed.clone());

    Ok(Json(confirmed))
}

/// POST `/versions/{id}/fork` - Copies a version's rows into a new version.
async fn fork_version(
    State(state): State<AppState>,
    Path(id): Path<VersionId>,
    Json(payload): Json<ForkRequest>,
) -> ApiResult<(StatusCode, Json<ForkResponse>)> {
    let _guard = state.budget_writes.lock().await;
    let source = state.store.versions.require(&id)?;
    let budgets = state.store.budgets_for_version(&id);

    let (version, copies) = VersionService::fork(
        &source,
        &budgets,
        &payload.name,
        payload.user_id.as_ref(),
        Utc::now(),
    )?;
    let budgets_copied = copies.len();
    state.store.versions.upsert(version.clone());
    for budget in copies {
        state.store.budgets.upsert(budget);
    }

    Ok((
        StatusCode::CREATED,
        Json(ForkResponse {
            version,
            budgets_copied,
        }),
    ))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::create_router;
    use crate::test_support::{get, post, test_app, test_state};

    #[tokio::test]
    async fn test_confirm() {
        let state = test_state();

        let (status, body) = post(
            create_router(state.clone()),
            "/api/v1/versions/ver_normal/confirm",
            json!({ "user_id": "user_002" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["is_confirmed"], true);
        assert_eq!(body["confirmed_by"], "user_002");

        let (status, _) = post(
            create_router(state),
            "/api/v1/versions/ver_normal/confirm",
            json!({ "user_id": "user_002" }),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_fork_confirmed_version() {
        let state = test_state();

        let (status, body) = post(
            create_router(state.clone()),
            "/api/v1/versions/ver_final/fork",
            json!({ "name": "Revised" }),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["budgets_copied"], 1);
        assert_eq!(body["version"]["is_confirmed"], false);
        assert_eq!(body["version"]["forked_from"], "ver_final");

        let new_id = body["version"]["id"].as_str().unwrap().to_string();
        let (_, budgets) = get(
            create_router(state.clone()),
            &format!("/api/v1/budgets?version={new_id}"),
        )
        .await;
        assert_eq!(budgets.as_array().unwrap().len(), 1);

        let (_, versions) = get(create_router(state), "/api/v1/versions").await;
        assert_eq!(versions.as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_fork_rejections() {
        let (status, _) = post(
            test_app(),
            "/api/v1/versions/ver_final/fork",
            json!({ "name": "  " }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = post(
            test_app(),
            "/api/v1/versions/ver_missing/fork",
            json!({ "name": "Copy" }),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
