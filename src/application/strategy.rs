//! Strategy facade.
//!
//! One [`Strategy`] models one trading session. Each cycle the caller asks
//! [`Strategy::prepare_for_next_trade`] for a decision, executes the trade
//! elsewhere, then reports the result through [`Strategy::update_state`].
//! Mutation takes `&mut self`, so the prepare, execute, update sequence is
//! serialized per session by construction.

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{info, warn};

use super::report::{PerformanceReport, StrategySnapshot};
use super::risk::{GateContext, GatePipeline};
use super::volatility::VolatilityAdjuster;
use crate::config::StrategyConfig;
use crate::domain::policy::{self, StakePolicy};
use crate::domain::{
    Decision, EngineState, Ledger, Profit, StakeBounds, Statistics, TradeOutcome, STAKE_DP,
};
use crate::error::{ConfigError, OutcomeError};

pub struct Strategy {
    config: StrategyConfig,
    policy: Box<dyn StakePolicy>,
    gates: GatePipeline,
    adjuster: VolatilityAdjuster,
    ledger: Ledger,
}

impl Strategy {
    /// Build a fresh engine.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `config` fails validation.
    pub fn new(config: StrategyConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let bounds = StakeBounds::from_config(&config);
        let ledger = Ledger::new(bounds, config.history_window);
        Ok(Self::assemble(config, ledger))
    }

    /// Rebuild an engine from a persisted snapshot.
    ///
    /// The snapshot's state is repaired against the current configuration
    /// (stake clamped, window resized) rather than rejected.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `config` fails validation or the snapshot
    /// was taken under a different stake policy.
    pub fn restore(config: StrategyConfig, snapshot: StrategySnapshot) -> Result<Self, ConfigError> {
        config.validate()?;
        if snapshot.policy != config.policy {
            return Err(ConfigError::invalid(
                "policy",
                format!(
                    "snapshot was taken with the {} policy, config selects {}",
                    snapshot.policy.as_str(),
                    config.policy.as_str()
                ),
            ));
        }

        let bounds = StakeBounds::from_config(&config);
        let sequence_len = policy::build(&config).sequence_len();
        let state = snapshot
            .state
            .normalized(&bounds, config.history_window, sequence_len);
        let ledger = Ledger::from_parts(bounds, config.history_window, state, snapshot.statistics);

        info!(
            policy = config.policy.as_str(),
            taken_at = %snapshot.taken_at,
            "Strategy restored from snapshot"
        );
        Ok(Self::assemble(config, ledger))
    }

    fn assemble(config: StrategyConfig, ledger: Ledger) -> Self {
        Self {
            policy: policy::build(&config),
            gates: GatePipeline::standard(),
            adjuster: VolatilityAdjuster::from_tuning(&config.risk),
            config,
            ledger,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &StrategyConfig {
        &self.config
    }

    #[must_use]
    pub fn policy_name(&self) -> &'static str {
        self.policy.name()
    }

    /// Decide whether the next trade may be placed and with what stake.
    ///
    /// Risk gates run first; the stake policy, volatility adjuster and
    /// bounds clamp only run when every gate passes.
    #[must_use]
    pub fn prepare_for_next_trade(&self) -> Decision {
        let state = self.ledger.state();
        let bounds = self.ledger.bounds();

        if let Err(stop) = self.gates.evaluate(&GateContext::new(&self.config, state)) {
            return Decision::stop(stop);
        }

        let candidate = self.policy.next_stake(state, bounds);
        let adjusted = self.adjuster.adjust(candidate, &state.recent, bounds);
        let amount = bounds.clamp(adjusted.round_dp(STAKE_DP));

        info!(
            policy = self.policy.name(),
            stake = %amount,
            candidate = %candidate,
            in_recovery = state.in_recovery,
            contract_type = %self.config.contract.contract_type,
            "Trade approved"
        );
        Decision::trade(amount, &self.config.contract)
    }

    /// Report the outcome of the last trade.
    ///
    /// # Errors
    ///
    /// Returns [`OutcomeError`] for a non-finite or unrepresentable profit;
    /// the engine is left untouched in that case.
    pub fn update_state(&mut self, is_win: bool, realized_profit: f64) -> Result<(), OutcomeError> {
        let outcome = TradeOutcome::new(is_win, realized_profit).map_err(|err| {
            warn!(error = %err, is_win, "Outcome rejected");
            err
        })?;
        self.record(outcome);
        Ok(())
    }

    /// Report an already-validated outcome.
    pub fn record(&mut self, outcome: TradeOutcome) {
        self.ledger.record(&outcome);
        self.policy.advance(&mut self.ledger, &outcome);
    }

    /// Copy of the current state.
    #[must_use]
    pub fn current_state(&self) -> EngineState {
        self.ledger.state().clone()
    }

    /// Copy of the cumulative statistics.
    #[must_use]
    pub fn statistics(&self) -> Statistics {
        self.ledger.statistics().clone()
    }

    #[must_use]
    pub fn analyze_performance(&self) -> PerformanceReport {
        PerformanceReport::from_statistics(self.ledger.statistics())
    }

    /// Restore construction-time state and statistics.
    pub fn reset_strategy(&mut self) {
        self.ledger.reset();
        info!(policy = self.policy.name(), "Strategy reset");
    }

    /// Start a new trading day.
    pub fn reset_daily(&mut self) {
        self.ledger.set_trades_today(0);
    }

    pub fn set_trades_today(&mut self, trades: u32) {
        self.ledger.set_trades_today(trades);
    }

    pub fn set_total_profit(&mut self, total: Profit) {
        self.ledger.set_total_profit(total);
    }

    /// Replace the recent-outcome window with bare profits, oldest first.
    /// Strictly positive profits count as wins.
    pub fn set_recovery_history<I>(&mut self, profits: I)
    where
        I: IntoIterator<Item = Decimal>,
    {
        self.ledger
            .replace_history(profits.into_iter().map(TradeOutcome::from_profit));
    }

    /// Switch trading off until [`Strategy::activate`] is called.
    pub fn deactivate(&mut self, reason: &str) {
        warn!(reason, "Strategy deactivated");
        self.ledger.set_active(false);
    }

    pub fn activate(&mut self) {
        info!("Strategy activated");
        self.ledger.set_active(true);
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.ledger.state().active
    }

    /// Capture state and statistics for the session store.
    #[must_use]
    pub fn snapshot(&self) -> StrategySnapshot {
        StrategySnapshot {
            policy: self.config.policy,
            state: self.current_state(),
            statistics: self.statistics(),
            taken_at: Utc::now(),
        }
    }
}

impl std::fmt::Debug for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Strategy")
            .field("policy", &self.policy.name())
            .field("gates", &self.gates.names())
            .field("state", self.ledger.state())
            .finish_non_exhaustive()
    }
}
