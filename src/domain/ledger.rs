//! Bookkeeping for engine state and statistics.
//!
//! The ledger is the only owner of [`EngineState`] and [`Statistics`].
//! Stake policies mutate it through the narrow hooks below, which keep the
//! invariants local: stakes are clamped on every write, streak counters are
//! mutually exclusive, and recovery is entered and left in one place.

use rust_decimal::Decimal;
use tracing::{debug, info};

use super::money::{Profit, Stake};
use super::outcome::TradeOutcome;
use super::state::{EngineState, StakeBounds, Statistics};
use super::window::OutcomeWindow;

#[derive(Debug, Clone)]
pub struct Ledger {
    bounds: StakeBounds,
    window: usize,
    state: EngineState,
    stats: Statistics,
}

impl Ledger {
    #[must_use]
    pub fn new(bounds: StakeBounds, window: usize) -> Self {
        Self {
            bounds,
            window,
            state: EngineState::new(bounds.floor, window),
            stats: Statistics::default(),
        }
    }

    /// Rebuild a ledger from persisted parts.
    #[must_use]
    pub fn from_parts(
        bounds: StakeBounds,
        window: usize,
        state: EngineState,
        stats: Statistics,
    ) -> Self {
        Self {
            bounds,
            window,
            state,
            stats,
        }
    }

    #[must_use]
    pub const fn bounds(&self) -> &StakeBounds {
        &self.bounds
    }

    #[must_use]
    pub const fn state(&self) -> &EngineState {
        &self.state
    }

    #[must_use]
    pub const fn statistics(&self) -> &Statistics {
        &self.stats
    }

    /// Apply the policy-independent effects of a resolved trade.
    pub fn record(&mut self, outcome: &TradeOutcome) {
        let profit = outcome.profit();
        self.state.total_profit = self.state.total_profit.saturating_add(profit);
        self.stats.net_profit = self.stats.net_profit.saturating_add(profit);
        self.state.trades_today = self.state.trades_today.saturating_add(1);

        if outcome.is_win() {
            self.stats.total_wins += 1;
            self.state.consecutive_wins += 1;
            self.state.consecutive_losses = 0;
        } else {
            self.stats.total_losses += 1;
            self.state.consecutive_losses += 1;
            self.state.consecutive_wins = 0;
        }
        self.state.recent.push(*outcome);

        debug!(
            win = outcome.is_win(),
            profit = %profit,
            total_profit = %self.state.total_profit,
            trades_today = self.state.trades_today,
            "Outcome recorded"
        );
    }

    /// Set the next stake, clamped to the configured bounds.
    pub fn set_stake(&mut self, stake: Stake) -> Stake {
        self.state.current_stake = self.bounds.clamp(stake);
        self.state.current_stake
    }

    pub fn set_sequence_step(&mut self, step: usize) {
        self.state.sequence_step = step;
    }

    /// Mark a progression cycle as walked to completion.
    pub fn complete_sequence(&mut self) {
        self.stats.sequences_completed += 1;
        self.state.sequence_step = 0;
        self.state.current_stake = self.bounds.floor;
        info!(
            completed = self.stats.sequences_completed,
            "Progression sequence completed"
        );
    }

    /// Add to the loss carried by the current recovery run.
    pub fn accumulate_loss(&mut self, amount: Decimal) -> Decimal {
        self.state.recovery_loss = self.state.recovery_loss.saturating_add(amount.abs());
        self.state.recovery_loss
    }

    /// Record one escalation step.
    pub fn enter_recovery(&mut self) {
        self.state.in_recovery = true;
        self.state.recovery_attempts += 1;
        self.stats.total_recovery_attempts += 1;
    }

    /// Leave recovery after a win. Returns false if there was nothing to resolve.
    pub fn resolve_recovery(&mut self) -> bool {
        self.state.recovery_loss = Decimal::ZERO;
        if !self.state.in_recovery {
            return false;
        }
        let attempts = self.state.recovery_attempts;
        self.state.in_recovery = false;
        self.state.recovery_attempts = 0;
        self.stats.successful_recoveries += 1;
        info!(
            attempts,
            successful = self.stats.successful_recoveries,
            "Recovery resolved"
        );
        true
    }

    pub fn set_trades_today(&mut self, trades: u32) {
        self.state.trades_today = trades;
    }

    pub fn set_total_profit(&mut self, total: Profit) {
        self.state.total_profit = total;
    }

    pub fn set_active(&mut self, active: bool) {
        self.state.active = active;
    }

    /// Replace the recent-outcome window, oldest first.
    pub fn replace_history<I>(&mut self, outcomes: I)
    where
        I: IntoIterator<Item = TradeOutcome>,
    {
        self.state.recent = OutcomeWindow::from_outcomes(self.window, outcomes);
    }

    /// Restore construction-time state and wipe statistics.
    pub fn reset(&mut self) {
        self.state = EngineState::new(self.bounds.floor, self.window);
        self.stats = Statistics::default();
    }
}
