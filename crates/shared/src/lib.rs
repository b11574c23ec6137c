//! Shared types, errors, and configuration for Yojitsu.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for type-safe entity references
//! - `YearMonth` and `FiscalYear` period keys
//! - Application-wide error types
//! - Configuration management
//! - The injected performance-monitor capability

pub mod config;
pub mod error;
pub mod telemetry;
pub mod types;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use telemetry::{Measurement, PerformanceMonitor, SharedMonitor};
