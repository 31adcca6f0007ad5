//! Resolved trade outcomes reported back by the execution collaborator.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::money::Profit;
use crate::error::OutcomeError;

/// The result of one resolved contract.
///
/// Construction through [`TradeOutcome::new`] is the only way a raw float
/// from the broker enters the engine, so a NaN or infinite profit can never
/// reach the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeOutcome {
    is_win: bool,
    profit: Profit,
}

impl TradeOutcome {
    /// Validate a raw outcome.
    ///
    /// Losses are normalized to a negative profit whatever sign the caller
    /// reports them with.
    ///
    /// # Errors
    ///
    /// Returns [`OutcomeError::NonFinite`] for NaN or infinite values and
    /// [`OutcomeError::OutOfRange`] for values a `Decimal` cannot hold.
    pub fn new(is_win: bool, realized_profit: f64) -> Result<Self, OutcomeError> {
        if !realized_profit.is_finite() {
            return Err(OutcomeError::NonFinite {
                value: realized_profit,
            });
        }
        let profit = Decimal::try_from(realized_profit).map_err(|_| OutcomeError::OutOfRange {
            value: realized_profit,
        })?;
        Ok(Self::from_decimal(is_win, profit))
    }

    /// Build an outcome from an already-decimal profit.
    #[must_use]
    pub fn from_decimal(is_win: bool, profit: Profit) -> Self {
        let profit = if is_win { profit } else { -profit.abs() };
        Self { is_win, profit }
    }

    /// Classify a bare profit figure: strictly positive is a win.
    #[must_use]
    pub fn from_profit(profit: Profit) -> Self {
        Self::from_decimal(profit > Decimal::ZERO, profit)
    }

    #[must_use]
    pub const fn is_win(&self) -> bool {
        self.is_win
    }

    /// Signed realized profit.
    #[must_use]
    pub const fn profit(&self) -> Profit {
        self.profit
    }

    /// Positive magnitude lost, zero for wins.
    #[must_use]
    pub fn loss(&self) -> Decimal {
        if self.is_win {
            Decimal::ZERO
        } else {
            self.profit.abs()
        }
    }
}
