//! Outcome builders and scripted play.

use rust_decimal::Decimal;

use crate::application::Strategy;
use crate::domain::{Decision, TradeOutcome};

/// A winning outcome with the given profit.
pub fn win(profit: i64) -> TradeOutcome {
    TradeOutcome::from_decimal(true, Decimal::from(profit))
}

/// A losing outcome of the given magnitude.
pub fn loss(amount: i64) -> TradeOutcome {
    TradeOutcome::from_decimal(false, Decimal::from(amount))
}

/// Feed signed profits through `update_state`; positive values are wins.
///
/// Panics on a rejected outcome, which only happens for non-finite input.
pub fn play(strategy: &mut Strategy, profits: &[f64]) {
    for &profit in profits {
        strategy
            .update_state(profit > 0.0, profit)
            .expect("scripted outcome must be finite");
    }
}

/// Run `prepare_for_next_trade` and report `profit` for every approved trade,
/// stopping at the first refusal. Returns every decision made.
pub fn play_until_stopped(strategy: &mut Strategy, profits: &[f64]) -> Vec<Decision> {
    let mut decisions = Vec::new();
    for &profit in profits {
        let decision = strategy.prepare_for_next_trade();
        let stop = !decision.should_trade;
        decisions.push(decision);
        if stop {
            break;
        }
        strategy
            .update_state(profit > 0.0, profit)
            .expect("scripted outcome must be finite");
    }
    decisions
}
