//! Engine state, cumulative statistics and stake bounds.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::money::{Profit, Stake};
use super::window::OutcomeWindow;
use crate::config::StrategyConfig;

/// Inclusive range every proposed stake must fall in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakeBounds {
    /// The base stake.
    pub floor: Stake,
    /// `floor × max_stake_multiplier`.
    pub ceiling: Stake,
}

impl StakeBounds {
    #[must_use]
    pub fn from_config(config: &StrategyConfig) -> Self {
        Self {
            floor: config.initial_stake,
            ceiling: config.max_stake(),
        }
    }

    #[must_use]
    pub fn clamp(&self, stake: Stake) -> Stake {
        stake.max(self.floor).min(self.ceiling)
    }

    #[must_use]
    pub fn contains(&self, stake: Stake) -> bool {
        stake >= self.floor && stake <= self.ceiling
    }
}

/// Mutable position of one trading session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineState {
    pub current_stake: Stake,
    pub in_recovery: bool,
    pub recovery_attempts: u32,
    pub total_profit: Profit,
    pub consecutive_wins: u32,
    pub consecutive_losses: u32,
    pub trades_today: u32,
    pub active: bool,
    /// Progression cursor (0-based).
    pub sequence_step: usize,
    /// Loss accumulated during the current recovery run.
    pub recovery_loss: Decimal,
    pub recent: OutcomeWindow,
}

impl EngineState {
    /// Construction-time state.
    #[must_use]
    pub fn new(initial_stake: Stake, window: usize) -> Self {
        Self {
            current_stake: initial_stake,
            in_recovery: false,
            recovery_attempts: 0,
            total_profit: Decimal::ZERO,
            consecutive_wins: 0,
            consecutive_losses: 0,
            trades_today: 0,
            active: true,
            sequence_step: 0,
            recovery_loss: Decimal::ZERO,
            recent: OutcomeWindow::new(window),
        }
    }

    /// Repair a state loaded from outside so every invariant holds again.
    #[must_use]
    pub fn normalized(mut self, bounds: &StakeBounds, window: usize, sequence_len: usize) -> Self {
        self.current_stake = bounds.clamp(self.current_stake);
        if self.consecutive_wins > 0 && self.consecutive_losses > 0 {
            self.consecutive_wins = 0;
            self.consecutive_losses = 0;
        }
        if self.in_recovery && self.recovery_attempts == 0 {
            self.recovery_attempts = 1;
        }
        if !self.in_recovery {
            self.recovery_attempts = 0;
            self.recovery_loss = Decimal::ZERO;
        }
        self.recovery_loss = self.recovery_loss.abs();
        if sequence_len > 0 {
            self.sequence_step %= sequence_len;
        }
        if self.recent.capacity() != window {
            self.recent = OutcomeWindow::from_outcomes(window, self.recent.iter().copied());
        }
        self
    }
}

/// Cumulative counters, wiped only by an explicit reset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    pub total_wins: u32,
    pub total_losses: u32,
    pub total_recovery_attempts: u32,
    pub successful_recoveries: u32,
    pub sequences_completed: u32,
    /// Sum of realized profit over every recorded outcome.
    pub net_profit: Profit,
}

impl Statistics {
    #[must_use]
    pub const fn trades(&self) -> u32 {
        self.total_wins + self.total_losses
    }

    /// Fraction of winning trades, `None` before the first trade.
    #[must_use]
    pub fn win_rate(&self) -> Option<f64> {
        match self.trades() {
            0 => None,
            total => Some(f64::from(self.total_wins) / f64::from(total)),
        }
    }
}
