//! Application services.
//!
//! These compose the domain types into the engine a caller drives:
//! risk gates, volatility adjustment and the [`Strategy`] facade.

pub mod report;
pub mod risk;
pub mod strategy;
pub mod volatility;

pub use report::{PerformanceReport, StrategySnapshot};
pub use strategy::Strategy;
pub use volatility::{normalized_volatility, VolatilityAdjuster};
