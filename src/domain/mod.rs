//! Engine domain: outcomes, decisions, state and stake policies.

mod decision;
mod ledger;
mod money;
mod outcome;
mod state;
mod window;

pub mod policy;

pub use decision::{Decision, StopReason};
pub use ledger::Ledger;
pub use money::{Profit, Stake, STAKE_DP};
pub use outcome::TradeOutcome;
pub use policy::{
    recovery_stake, FixedProgressionPolicy, MultiplicativeRecoveryPolicy, StakePolicy,
    PROGRESSION,
};
pub use state::{EngineState, StakeBounds, Statistics};
pub use window::OutcomeWindow;
