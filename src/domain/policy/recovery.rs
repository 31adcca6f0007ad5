//! Multiplicative loss recovery.
//!
//! After a loss the next stake is sized so that one win at the configured
//! payout rate recovers everything lost in the current run plus one base
//! stake. The hard ceiling caps the escalation: whatever it cannot cover is
//! absorbed rather than chased.

use rust_decimal::Decimal;
use tracing::debug;

use super::StakePolicy;
use crate::domain::ledger::Ledger;
use crate::domain::money::Stake;
use crate::domain::outcome::TradeOutcome;
use crate::domain::state::{EngineState, StakeBounds};

/// Stake that recovers `loss` plus one base stake on the next win.
///
/// `clamp(loss × (1 + rate) / rate + floor, floor, ceiling)`. A non-positive
/// rate yields the floor; arithmetic overflow yields the ceiling.
#[must_use]
pub fn recovery_stake(loss: Decimal, payout_rate: Decimal, bounds: &StakeBounds) -> Stake {
    if payout_rate <= Decimal::ZERO {
        return bounds.floor;
    }
    loss.abs()
        .checked_mul(Decimal::ONE + payout_rate)
        .and_then(|v| v.checked_div(payout_rate))
        .and_then(|v| v.checked_add(bounds.floor))
        .map_or(bounds.ceiling, |stake| bounds.clamp(stake))
}

#[derive(Debug, Clone, Copy)]
pub struct MultiplicativeRecoveryPolicy {
    payout_rate: Decimal,
    escalate: bool,
}

impl MultiplicativeRecoveryPolicy {
    /// `escalate = false` keeps recovery bookkeeping but never raises the stake.
    #[must_use]
    pub const fn new(payout_rate: Decimal, escalate: bool) -> Self {
        Self {
            payout_rate,
            escalate,
        }
    }
}

impl StakePolicy for MultiplicativeRecoveryPolicy {
    fn name(&self) -> &'static str {
        "recovery"
    }

    fn next_stake(&self, state: &EngineState, bounds: &StakeBounds) -> Stake {
        bounds.clamp(state.current_stake)
    }

    fn advance(&self, ledger: &mut Ledger, outcome: &TradeOutcome) {
        let bounds = *ledger.bounds();

        if outcome.is_win() {
            ledger.resolve_recovery();
            ledger.set_stake(bounds.floor);
        } else {
            let loss = ledger.accumulate_loss(outcome.loss());
            ledger.enter_recovery();
            let next = if self.escalate {
                recovery_stake(loss, self.payout_rate, &bounds)
            } else {
                bounds.floor
            };
            ledger.set_stake(next);
        }

        debug!(
            in_recovery = ledger.state().in_recovery,
            recovery_loss = %ledger.state().recovery_loss,
            stake = %ledger.state().current_stake,
            "Recovery advanced"
        );
    }
}
