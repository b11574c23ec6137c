//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST API routes under `/api/v1`
//! - Application state wiring the core services to the in-memory store
//! - JSON error responses

pub mod error;
pub mod routes;

#[cfg(test)]
mod test_support;

use std::sync::Arc;

use axum::Router;
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use yojitsu_core::actual::ActualImporter;
use yojitsu_core::analysis::{AnalysisSettings, VarianceAnalyzer};
use yojitsu_core::budget::BudgetService;
use yojitsu_core::export::ExportService;
use yojitsu_core::factor::{CalculationEngine, FactorRates};
use yojitsu_core::store::Store;
use yojitsu_shared::{AppConfig, SharedMonitor};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Record store.
    pub store: Arc<Store>,
    /// Factor-linked calculation engine.
    pub engine: CalculationEngine,
    /// Budget row preparation.
    pub budgets: BudgetService,
    /// Variance and KPI analysis.
    pub analyzer: VarianceAnalyzer,
    /// Actual import validation.
    pub importer: ActualImporter,
    /// Report export.
    pub exporter: ExportService,
    /// First calendar month of the fiscal year.
    pub fiscal_start_month: u32,
    /// Held by every read-check-write on versions and budget rows.
    pub budget_writes: Arc<Mutex<()>>,
}

impl AppState {
    /// Wires the services from configuration around `store`.
    pub fn new(store: Store, config: &AppConfig, monitor: SharedMonitor) -> Self {
        let engine = CalculationEngine::new(FactorRates::from(&config.calculation), monitor.clone());
        Self {
            store: Arc::new(store),
            budgets: BudgetService::new(engine.clone()),
            engine,
            analyzer: VarianceAnalyzer::new(AnalysisSettings::from(&config.analysis), monitor.clone()),
            importer: ActualImporter::new(monitor.clone()),
            exporter: ExportService::new(monitor),
            fiscal_start_month: config.fiscal.start_month,
            budget_writes: Arc::new(Mutex::new(())),
        }
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
