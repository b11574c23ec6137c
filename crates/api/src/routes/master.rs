//! Account and vendor listing.

use axum::{Json, Router, extract::State, routing::get};
use yojitsu_core::master::{Account, Vendor};
use yojitsu_core::store::Repository;

use crate::AppState;

/// Creates master data routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/accounts", get(list_accounts))
        .route("/vendors", get(list_vendors))
}

/// GET `/accounts` - Accounts in display order.
async fn list_accounts(State(state): State<AppState>) -> Json<Vec<Account>> {
    let mut accounts = state.store.accounts.all();
    accounts.sort_by(|a, b| {
        a.display_order
            .cmp(&b.display_order)
            .then_with(|| a.code.cmp(&b.code))
    });
    Json(accounts)
}

/// GET `/vendors` - Vendors by code.
async fn list_vendors(State(state): State<AppState>) -> Json<Vec<Vendor>> {
    let mut vendors = state.store.vendors.all();
    vendors.sort_by(|a, b| a.code.cmp(&b.code));
    Json(vendors)
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use crate::test_support::{get, test_app};

    #[tokio::test]
    async fn test_accounts_in_display_order() {
        let (status, body) = get(test_app(), "/api/v1/accounts").await;

        assert_eq!(status, StatusCode::OK);
        let codes: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|a| a["code"].as_str().unwrap())
            .collect();
        assert_eq!(codes, vec!["5100", "6100"]);
    }

    #[tokio::test]
    async fn test_vendors() {
        let (status, body) = get(test_app(), "/api/v1/vendors").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["name"], "Alpha Co.");
    }
}
