//! Trade decisions and the reasons a trade is refused.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::money::Stake;
use crate::config::ContractConfig;

/// Why the risk gates refused a trade.
///
/// The rendered text always contains a fixed phrase per variant so callers
/// can match on it by substring: "Strategy is inactive", "Loss limit
/// reached", "Profit lock", "Daily trade limit", "Max recovery attempts",
/// "Volatility too high", "Win rate below minimum".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StopReason {
    Inactive,
    LossLimit {
        total_profit: Decimal,
        limit: Decimal,
    },
    ProfitLock {
        total_profit: Decimal,
        lock_level: Decimal,
        target: Decimal,
    },
    DailyTradeLimit {
        trades: u32,
        limit: u32,
    },
    RecoveryExhausted {
        attempts: u32,
        limit: u32,
    },
    Volatility {
        volatility: f64,
        limit: f64,
    },
    WinRate {
        win_rate: f64,
        minimum: f64,
    },
}

impl StopReason {
    /// Stable identifier used in logs.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Inactive => "inactive",
            Self::LossLimit { .. } => "loss_limit",
            Self::ProfitLock { .. } => "profit_lock",
            Self::DailyTradeLimit { .. } => "daily_trade_limit",
            Self::RecoveryExhausted { .. } => "recovery_exhausted",
            Self::Volatility { .. } => "volatility",
            Self::WinRate { .. } => "win_rate",
        }
    }
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inactive => write!(f, "Strategy is inactive"),
            Self::LossLimit {
                total_profit,
                limit,
            } => write!(
                f,
                "Loss limit reached: total profit {total_profit} at or below -{limit}"
            ),
            Self::ProfitLock {
                total_profit,
                lock_level,
                target,
            } => {
                if total_profit >= target {
                    write!(f, "Profit lock: target {target} reached ({total_profit})")
                } else {
                    write!(
                        f,
                        "Profit lock: {total_profit} secured, lock level {lock_level} of target {target}"
                    )
                }
            }
            Self::DailyTradeLimit { trades, limit } => {
                write!(f, "Daily trade limit reached ({trades}/{limit})")
            }
            Self::RecoveryExhausted { attempts, limit } => {
                write!(f, "Max recovery attempts reached ({attempts}/{limit})")
            }
            Self::Volatility { volatility, limit } => {
                write!(f, "Volatility too high ({volatility:.3} > {limit:.3})")
            }
            Self::WinRate { win_rate, minimum } => write!(
                f,
                "Win rate below minimum ({:.1}% < {:.1}%)",
                win_rate * 100.0,
                minimum * 100.0
            ),
        }
    }
}

/// Answer to "may the next trade be placed, and with what stake?".
///
/// `amount` is only meaningful when `should_trade` is true; `reason` is
/// always present when it is false.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub should_trade: bool,
    pub amount: Option<Stake>,
    pub contract_type: Option<String>,
    pub prediction: Option<String>,
    pub market: Option<String>,
    pub reason: Option<String>,
    pub stop: Option<StopReason>,
}

impl Decision {
    /// A go decision carrying the stake and contract selection.
    #[must_use]
    pub fn trade(amount: Stake, contract: &ContractConfig) -> Self {
        Self {
            should_trade: true,
            amount: Some(amount),
            contract_type: Some(contract.contract_type.clone()),
            prediction: contract.prediction.clone(),
            market: Some(contract.market.clone()),
            reason: None,
            stop: None,
        }
    }

    /// A refusal with its rendered reason.
    #[must_use]
    pub fn stop(reason: StopReason) -> Self {
        Self {
            should_trade: false,
            amount: None,
            contract_type: None,
            prediction: None,
            market: None,
            reason: Some(reason.to_string()),
            stop: Some(reason),
        }
    }

    /// True when the refusal text contains `needle`.
    #[must_use]
    pub fn reason_contains(&self, needle: &str) -> bool {
        self.reason.as_deref().is_some_and(|r| r.contains(needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_reason_phrases() {
        let cases = [
            (StopReason::Inactive, "Strategy is inactive"),
            (
                StopReason::LossLimit {
                    total_profit: dec!(-10),
                    limit: dec!(10),
                },
                "Loss limit reached",
            ),
            (
                StopReason::ProfitLock {
                    total_profit: dec!(6),
                    lock_level: dec!(5),
                    target: dec!(10),
                },
                "Profit lock",
            ),
            (
                StopReason::DailyTradeLimit {
                    trades: 5,
                    limit: 5,
                },
                "Daily trade limit",
            ),
            (
                StopReason::RecoveryExhausted {
                    attempts: 3,
                    limit: 3,
                },
                "Max recovery attempts",
            ),
            (
                StopReason::Volatility {
                    volatility: 0.9,
                    limit: 0.5,
                },
                "Volatility too high",
            ),
            (
                StopReason::WinRate {
                    win_rate: 0.2,
                    minimum: 0.4,
                },
                "Win rate below minimum",
            ),
        ];

        for (reason, phrase) in cases {
            let decision = Decision::stop(reason);
            assert!(!decision.should_trade);
            assert!(decision.amount.is_none());
            assert!(
                decision.reason_contains(phrase),
                "{:?} should contain {phrase}",
                decision.reason
            );
        }
    }

    #[test]
    fn test_profit_lock_text_distinguishes_target() {
        let secured = StopReason::ProfitLock {
            total_profit: dec!(6),
            lock_level: dec!(5),
            target: dec!(10),
        };
        let reached = StopReason::ProfitLock {
            total_profit: dec!(12),
            lock_level: dec!(5),
            target: dec!(10),
        };

        assert!(secured.to_string().contains("secured"));
        assert!(reached.to_string().contains("target 10 reached"));
    }

    #[test]
    fn test_trade_copies_contract_selection() {
        let contract = ContractConfig {
            contract_type: "DIGITOVER".into(),
            prediction: Some("5".into()),
            market: "R_50".into(),
        };
        let decision = Decision::trade(dec!(2.5), &contract);

        assert!(decision.should_trade);
        assert_eq!(decision.amount, Some(dec!(2.5)));
        assert_eq!(decision.contract_type.as_deref(), Some("DIGITOVER"));
        assert_eq!(decision.prediction.as_deref(), Some("5"));
        assert_eq!(decision.market.as_deref(), Some("R_50"));
        assert!(decision.reason.is_none());
    }
}
