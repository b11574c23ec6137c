//! Budget versus actual variance and KPI analysis.

pub mod error;
pub mod service;
pub mod types;
pub mod variance;

#[cfg(test)]
mod tests;

pub use error::AnalysisError;
pub use service::VarianceAnalyzer;
pub use types::{
    AnalysisSettings, FiscalYearAnalysis, KpiAnalysis, MonthlyComparison, VarianceAnalysis,
};
pub use variance::Variance;
