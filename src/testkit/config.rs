//! Canonical test configurations.
//!
//! Single source of truth for strategy configs used across tests.

use rust_decimal::Decimal;

use crate::config::{PolicyKind, StrategyConfig};

/// Stake 5, profit target 1000, loss limit 500, recovery policy.
///
/// Recovery escalation is capped at ×10 and the daily limit is high enough
/// that only tests targeting it will ever hit it.
pub fn strategy() -> StrategyConfig {
    StrategyConfig {
        initial_stake: Decimal::from(5),
        profit_threshold: Decimal::from(1000),
        loss_threshold: Decimal::from(500),
        max_recovery_attempts: 5,
        max_daily_trades: 100,
        max_stake_multiplier: Decimal::from(10),
        ..Default::default()
    }
}

/// [`strategy`] with the 1-3-2-6 progression.
pub fn progression() -> StrategyConfig {
    StrategyConfig {
        policy: PolicyKind::Progression,
        ..strategy()
    }
}

/// [`strategy`] with volatility gating and stake shrinkage enabled.
pub fn auto_adjust(max_volatility: f64) -> StrategyConfig {
    let mut config = strategy();
    config.risk.enable_auto_adjust = true;
    config.risk.max_volatility = max_volatility;
    config
}
