//! Fluctuation factors and factor-linked budget calculation.

pub mod engine;
pub mod error;
pub mod forecast;
pub mod types;


pub use engine::CalculationEngine;
pub use error::CalculationError;
pub use forecast::forecast_grid;
pub use types::{
    CalculationDetails, FactorCalculation, FactorForecast, FactorForecastGrid, FactorRates,
    FactorType, FluctuationFactor, MonthlyAmount, MonthlyForecast,
};
