//! Configuration loaded from TOML.

pub mod logging;
pub mod settings;
pub mod strategy;

pub use logging::LoggingConfig;
pub use settings::Config;
pub use strategy::{ContractConfig, PolicyKind, RiskTuning, StrategyConfig};
