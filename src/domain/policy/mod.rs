//! Stake policies.
//!
//! A policy answers two questions for the engine:
//!
//! - `next_stake()` - what to risk on the next trade, given the current state
//! - `advance()` - how a resolved trade moves the stake and recovery state
//!
//! Two interchangeable variants exist:
//!
//! - [`FixedProgressionPolicy`] - 1-3-2-6 multipliers advanced by wins
//! - [`MultiplicativeRecoveryPolicy`] - stake sized to win back the running loss
//!
//! The variant is picked once, at construction, from [`PolicyKind`].

mod progression;
mod recovery;

pub use progression::{FixedProgressionPolicy, PROGRESSION};
pub use recovery::{recovery_stake, MultiplicativeRecoveryPolicy};

use super::ledger::Ledger;
use super::money::Stake;
use super::outcome::TradeOutcome;
use super::state::{EngineState, StakeBounds};
use crate::config::{PolicyKind, StrategyConfig};

pub trait StakePolicy: Send + Sync {
    /// Identifier used in logs and snapshots.
    fn name(&self) -> &'static str;

    /// Stake for the next trade. Called only after every risk gate passed.
    fn next_stake(&self, state: &EngineState, bounds: &StakeBounds) -> Stake;

    /// Move stake, sequence and recovery state after `ledger.record(outcome)`.
    fn advance(&self, ledger: &mut Ledger, outcome: &TradeOutcome);

    /// Length of the policy's stake cycle, zero if it has none.
    fn sequence_len(&self) -> usize {
        0
    }
}

/// Build the policy selected in `config`.
#[must_use]
pub fn build(config: &StrategyConfig) -> Box<dyn StakePolicy> {
    match config.policy {
        PolicyKind::Progression => Box::new(FixedProgressionPolicy::new()),
        PolicyKind::Recovery => Box::new(MultiplicativeRecoveryPolicy::new(
            config.payout_rate,
            config.risk.enable_recovery,
        )),
    }
}
