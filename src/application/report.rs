//! Performance summaries and persistence snapshots.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::PolicyKind;
use crate::domain::{EngineState, Profit, Statistics};

/// Derived performance figures; ratios are `None` before the first trade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceReport {
    pub trades: u32,
    pub wins: u32,
    pub losses: u32,
    /// `wins / trades`.
    pub win_rate: Option<f64>,
    /// Mean realized profit per trade.
    pub avg_profit: Option<Profit>,
    pub net_profit: Profit,
    pub sequences_completed: u32,
    pub recovery_attempts: u32,
    pub successful_recoveries: u32,
}

impl PerformanceReport {
    #[must_use]
    pub fn from_statistics(stats: &Statistics) -> Self {
        let trades = stats.trades();
        let avg_profit = (trades > 0).then(|| stats.net_profit / Decimal::from(trades));
        Self {
            trades,
            wins: stats.total_wins,
            losses: stats.total_losses,
            win_rate: stats.win_rate(),
            avg_profit,
            net_profit: stats.net_profit,
            sequences_completed: stats.sequences_completed,
            recovery_attempts: stats.total_recovery_attempts,
            successful_recoveries: stats.successful_recoveries,
        }
    }
}

/// Everything needed to rebuild an engine after a restart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategySnapshot {
    pub policy: PolicyKind,
    pub state: EngineState,
    pub statistics: Statistics,
    pub taken_at: DateTime<Utc>,
}

impl StrategySnapshot {
    /// Serialize to JSON for the session store.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse a snapshot produced by [`StrategySnapshot::to_json`].
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed.
    pub fn from_json(json: &str) -> crate::error::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
