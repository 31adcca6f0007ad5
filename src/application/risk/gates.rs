//! The engine's risk gates.

use rust_decimal::Decimal;

use super::gate::{GateContext, RiskGate};
use crate::application::volatility::normalized_volatility;
use crate::domain::StopReason;

/// Refuses while the strategy is switched off.
#[derive(Debug, Clone, Copy, Default)]
pub struct InactivityGate;

impl RiskGate for InactivityGate {
    fn name(&self) -> &'static str {
        "inactivity"
    }

    fn check(&self, ctx: &GateContext<'_>) -> Result<(), StopReason> {
        if ctx.state.active {
            Ok(())
        } else {
            Err(StopReason::Inactive)
        }
    }
}

/// Refuses once cumulative profit falls to `-loss_threshold`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LossLimitGate;

impl RiskGate for LossLimitGate {
    fn name(&self) -> &'static str {
        "loss_limit"
    }

    fn check(&self, ctx: &GateContext<'_>) -> Result<(), StopReason> {
        let limit = ctx.config.loss_threshold;
        let total_profit = ctx.state.total_profit;
        if total_profit <= -limit {
            return Err(StopReason::LossLimit {
                total_profit,
                limit,
            });
        }
        Ok(())
    }
}

/// Refuses once cumulative profit reaches the lock level.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProfitLockGate;

impl RiskGate for ProfitLockGate {
    fn name(&self) -> &'static str {
        "profit_lock"
    }

    fn check(&self, ctx: &GateContext<'_>) -> Result<(), StopReason> {
        let lock_level = ctx.config.profit_lock_level();
        let total_profit = ctx.state.total_profit;
        if total_profit > Decimal::ZERO && total_profit >= lock_level {
            return Err(StopReason::ProfitLock {
                total_profit,
                lock_level,
                target: ctx.config.profit_threshold,
            });
        }
        Ok(())
    }
}

/// Refuses once today's trade count reaches `max_daily_trades` (0 = unlimited).
#[derive(Debug, Clone, Copy, Default)]
pub struct DailyTradeLimitGate;

impl RiskGate for DailyTradeLimitGate {
    fn name(&self) -> &'static str {
        "daily_trade_limit"
    }

    fn check(&self, ctx: &GateContext<'_>) -> Result<(), StopReason> {
        let limit = ctx.config.max_daily_trades;
        let trades = ctx.state.trades_today;
        if limit > 0 && trades >= limit {
            return Err(StopReason::DailyTradeLimit { trades, limit });
        }
        Ok(())
    }
}

/// Refuses while in recovery with the escalation budget spent.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecoveryExhaustionGate;

impl RiskGate for RecoveryExhaustionGate {
    fn name(&self) -> &'static str {
        "recovery_exhaustion"
    }

    fn check(&self, ctx: &GateContext<'_>) -> Result<(), StopReason> {
        let limit = ctx.config.max_recovery_attempts;
        let attempts = ctx.state.recovery_attempts;
        if ctx.state.in_recovery && attempts >= limit {
            return Err(StopReason::RecoveryExhausted { attempts, limit });
        }
        Ok(())
    }
}

/// Skips the cycle when recent outcomes are too erratic (auto-adjust only).
///
/// A vetoed cycle records no outcome, so the window that tripped the gate is
/// still there on the next call: once tripped, the gate keeps refusing until
/// the window is cleared by `reset_strategy` or replaced through
/// `set_recovery_history`. With mixed-sign outcomes normalized volatility
/// sits near 1, so `max_volatility` below about 0.9 trips on the first loss
/// that follows a win.
#[derive(Debug, Clone, Copy, Default)]
pub struct VolatilityGate;

impl RiskGate for VolatilityGate {
    fn name(&self) -> &'static str {
        "volatility"
    }

    fn check(&self, ctx: &GateContext<'_>) -> Result<(), StopReason> {
        let risk = &ctx.config.risk;
        if !risk.enable_auto_adjust {
            return Ok(());
        }
        let volatility = normalized_volatility(&ctx.state.recent);
        if volatility > risk.max_volatility {
            return Err(StopReason::Volatility {
                volatility,
                limit: risk.max_volatility,
            });
        }
        Ok(())
    }
}

/// Refuses when a full window wins less often than `min_win_rate` (auto-adjust only).
#[derive(Debug, Clone, Copy, Default)]
pub struct WinRateGate;

impl RiskGate for WinRateGate {
    fn name(&self) -> &'static str {
        "win_rate"
    }

    fn check(&self, ctx: &GateContext<'_>) -> Result<(), StopReason> {
        let risk = &ctx.config.risk;
        let recent = &ctx.state.recent;
        if !risk.enable_auto_adjust || risk.min_win_rate <= 0.0 || !recent.is_full() {
            return Ok(());
        }
        match recent.win_rate() {
            Some(win_rate) if win_rate < risk.min_win_rate => Err(StopReason::WinRate {
                win_rate,
                minimum: risk.min_win_rate,
            }),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StrategyConfig;
    use crate::domain::{EngineState, TradeOutcome};
    use rust_decimal_macros::dec;

    fn config() -> StrategyConfig {
        StrategyConfig {
            initial_stake: dec!(5),
            profit_threshold: dec!(100),
            loss_threshold: dec!(50),
            max_daily_trades: 10,
            max_recovery_attempts: 2,
            history_window: 4,
            ..Default::default()
        }
    }

    fn state() -> EngineState {
        EngineState::new(dec!(5), 4)
    }

    fn check(
        gate: &dyn RiskGate,
        config: &StrategyConfig,
        state: &EngineState,
    ) -> Result<(), StopReason> {
        gate.check(&GateContext::new(config, state))
    }

    #[test]
    fn test_inactivity() {
        let config = config();
        let mut state = state();
        assert!(check(&InactivityGate, &config, &state).is_ok());

        state.active = false;
        assert_eq!(check(&InactivityGate, &config, &state), Err(StopReason::Inactive));
    }

    #[test]
    fn test_loss_limit_is_inclusive() {
        let config = config();
        let mut state = state();

        state.total_profit = dec!(-49.99);
        assert!(check(&LossLimitGate, &config, &state).is_ok());

        state.total_profit = dec!(-50);
        assert!(matches!(
            check(&LossLimitGate, &config, &state),
            Err(StopReason::LossLimit { .. })
        ));
    }

    #[test]
    fn test_profit_lock_at_half_target() {
        let config = config();
        let mut state = state();

        state.total_profit = dec!(49.99);
        assert!(check(&ProfitLockGate, &config, &state).is_ok());

        state.total_profit = dec!(50);
        let err = check(&ProfitLockGate, &config, &state).unwrap_err();
        assert!(err.to_string().contains("Profit lock"));
    }

    #[test]
    fn test_daily_limit_zero_means_unlimited() {
        let mut config = config();
        let mut state = state();
        state.trades_today = 10;
        assert!(matches!(
            check(&DailyTradeLimitGate, &config, &state),
            Err(StopReason::DailyTradeLimit { trades: 10, limit: 10 })
        ));

        config.max_daily_trades = 0;
        assert!(check(&DailyTradeLimitGate, &config, &state).is_ok());
    }

    #[test]
    fn test_recovery_exhaustion_requires_recovery() {
        let config = config();
        let mut state = state();
        state.recovery_attempts = 2;
        assert!(check(&RecoveryExhaustionGate, &config, &state).is_ok());

        state.in_recovery = true;
        assert!(matches!(
            check(&RecoveryExhaustionGate, &config, &state),
            Err(StopReason::RecoveryExhausted { attempts: 2, limit: 2 })
        ));
    }

    #[test]
    fn test_volatility_gate_only_with_auto_adjust() {
        let mut config = config();
        let mut state = state();
        for profit in [dec!(5), dec!(-5), dec!(5), dec!(-5)] {
            state.recent.push(TradeOutcome::from_profit(profit));
        }
        assert!(check(&VolatilityGate, &config, &state).is_ok());

        config.risk.enable_auto_adjust = true;
        config.risk.max_volatility = 0.8;
        assert!(matches!(
            check(&VolatilityGate, &config, &state),
            Err(StopReason::Volatility { .. })
        ));
    }

    #[test]
    fn test_win_rate_gate_waits_for_full_window() {
        let mut config = config();
        config.risk.enable_auto_adjust = true;
        config.risk.min_win_rate = 0.5;
        let mut state = state();

        for profit in [dec!(-5), dec!(-5), dec!(4)] {
            state.recent.push(TradeOutcome::from_profit(profit));
        }
        assert!(check(&WinRateGate, &config, &state).is_ok());

        state.recent.push(TradeOutcome::from_profit(dec!(-5)));
        assert!(matches!(
            check(&WinRateGate, &config, &state),
            Err(StopReason::WinRate { .. })
        ));
    }
}
