//! Application configuration management.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Factor-linked budget calculation rates.
    #[serde(default)]
    pub calculation: CalculationConfig,
    /// Variance analysis settings.
    #[serde(default)]
    pub analysis: AnalysisConfig,
    /// Fiscal calendar.
    #[serde(default)]
    pub fiscal: FiscalConfig,
    /// Initial data loaded into the in-memory store.
    #[serde(default)]
    pub seed: SeedConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is not set.
    #[serde(default = "default_log_filter")]
    pub filter: String,
    /// Operations slower than this are logged at warn level.
    #[serde(default = "default_slow_operation_ms")]
    pub slow_operation_ms: u64,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            slow_operation_ms: default_slow_operation_ms(),
        }
    }
}

fn default_log_filter() -> String {
    "yojitsu=info,tower_http=info".to_string()
}

fn default_slow_operation_ms() -> u64 {
    500
}

/// Rates used by the factor-linked calculation engine.
#[derive(Debug, Clone, Deserialize)]
pub struct CalculationConfig {
    /// Currency units per head for headcount factors.
    #[serde(default = "default_headcount_unit_price")]
    pub headcount_unit_price: Decimal,
    /// Fraction of revenue for revenue factors (0.05 = 5%).
    #[serde(default = "default_revenue_link_rate")]
    pub revenue_link_rate: Decimal,
}

impl Default for CalculationConfig {
    fn default() -> Self {
        Self {
            headcount_unit_price: default_headcount_unit_price(),
            revenue_link_rate: default_revenue_link_rate(),
        }
    }
}

fn default_headcount_unit_price() -> Decimal {
    Decimal::from(45_000)
}

fn default_revenue_link_rate() -> Decimal {
    Decimal::new(5, 2)
}

/// Variance analysis settings.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisConfig {
    /// Absolute variance rate (percent) at which a variance is significant.
    #[serde(default = "default_significant_variance_threshold")]
    pub significant_variance_threshold: Decimal,
    /// Number of significant variances surfaced in the KPI summary.
    #[serde(default = "default_top_n_variances")]
    pub top_n_variances: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            significant_variance_threshold: default_significant_variance_threshold(),
            top_n_variances: default_top_n_variances(),
        }
    }
}

fn default_significant_variance_threshold() -> Decimal {
    Decimal::TEN
}

fn default_top_n_variances() -> usize {
    5
}

/// Fiscal calendar configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct FiscalConfig {
    /// First calendar month of the fiscal year.
    #[serde(default = "default_start_month")]
    pub start_month: u32,
}

impl Default for FiscalConfig {
    fn default() -> Self {
        Self {
            start_month: default_start_month(),
        }
    }
}

fn default_start_month() -> u32 {
    crate::types::DEFAULT_FISCAL_START_MONTH
}

/// Seed data configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeedConfig {
    /// Path to a JSON snapshot loaded at startup.
    pub path: Option<String>,
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(
                config::Environment::with_prefix("YOJITSU")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
