//! Fixed 1-3-2-6 progression.
//!
//! Each win moves one step along the multiplier sequence; the fourth win
//! banks the cycle and starts over at the base stake. A loss at any step
//! drops straight back to step one.

use rust_decimal::Decimal;
use tracing::debug;

use super::StakePolicy;
use crate::domain::ledger::Ledger;
use crate::domain::money::Stake;
use crate::domain::outcome::TradeOutcome;
use crate::domain::state::{EngineState, StakeBounds};

/// Stake multipliers applied to the base stake, one per step.
pub const PROGRESSION: [u32; 4] = [1, 3, 2, 6];

#[derive(Debug, Clone, Copy, Default)]
pub struct FixedProgressionPolicy;

impl FixedProgressionPolicy {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Unclamped stake for a progression step, saturating at `Decimal::MAX`.
    #[must_use]
    pub fn step_stake(step: usize, base: Stake) -> Stake {
        let multiplier = PROGRESSION[step % PROGRESSION.len()];
        base.checked_mul(Decimal::from(multiplier))
            .unwrap_or(Decimal::MAX)
    }
}

impl StakePolicy for FixedProgressionPolicy {
    fn name(&self) -> &'static str {
        "progression"
    }

    fn next_stake(&self, state: &EngineState, bounds: &StakeBounds) -> Stake {
        bounds.clamp(Self::step_stake(state.sequence_step, bounds.floor))
    }

    fn advance(&self, ledger: &mut Ledger, outcome: &TradeOutcome) {
        let base = ledger.bounds().floor;

        if outcome.is_win() {
            let step = ledger.state().sequence_step + 1;
            if step >= PROGRESSION.len() {
                ledger.complete_sequence();
            } else {
                ledger.set_sequence_step(step);
                ledger.set_stake(Self::step_stake(step, base));
            }
            if ledger.state().in_recovery && ledger.state().total_profit >= Decimal::ZERO {
                ledger.resolve_recovery();
            }
        } else {
            ledger.set_sequence_step(0);
            ledger.set_stake(base);
            if ledger.state().total_profit < Decimal::ZERO {
                ledger.accumulate_loss(outcome.loss());
                ledger.enter_recovery();
            }
        }

        debug!(
            step = ledger.state().sequence_step,
            stake = %ledger.state().current_stake,
            "Progression advanced"
        );
    }

    fn sequence_len(&self) -> usize {
        PROGRESSION.len()
    }
}
