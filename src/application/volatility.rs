//! Outcome volatility and advisory stake shrinkage.
//!
//! Volatility here is the population standard deviation of the recent
//! realized profits divided by the largest absolute profit in the window.
//! That normalization keeps it in `[0, 1]` whatever the stake size, so one
//! `max_volatility` fraction works for every account.

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::RiskTuning;
use crate::domain::{OutcomeWindow, Stake, StakeBounds, STAKE_DP};

/// Smallest factor the adjuster will scale a stake by.
const MIN_SCALE: f64 = 0.5;

/// Normalized volatility of the window's profits, `0.0` with fewer than two
/// entries or when every profit is zero.
#[must_use]
pub fn normalized_volatility(window: &OutcomeWindow) -> f64 {
    let profits = window.profits();
    if profits.len() < 2 {
        return 0.0;
    }

    let peak = profits.iter().fold(0.0_f64, |acc, p| acc.max(p.abs()));
    if peak == 0.0 {
        return 0.0;
    }

    let n = profits.len() as f64;
    let mean = profits.iter().sum::<f64>() / n;
    let variance = profits.iter().map(|p| (p - mean).powi(2)).sum::<f64>() / n;

    (variance.sqrt() / peak).clamp(0.0, 1.0)
}

/// Shrinks proposed stakes while volatility sits between the soft midpoint
/// and the hard limit. Above the hard limit the volatility gate has already
/// refused the trade.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolatilityAdjuster {
    enabled: bool,
    max_volatility: f64,
}

impl VolatilityAdjuster {
    #[must_use]
    pub const fn new(enabled: bool, max_volatility: f64) -> Self {
        Self {
            enabled,
            max_volatility,
        }
    }

    #[must_use]
    pub const fn from_tuning(tuning: &RiskTuning) -> Self {
        Self::new(tuning.enable_auto_adjust, tuning.max_volatility)
    }

    /// Volatility above which stakes start to shrink.
    #[must_use]
    pub fn soft_limit(&self) -> f64 {
        self.max_volatility / 2.0
    }

    /// Multiplier in `[MIN_SCALE, 1]` for the given volatility.
    #[must_use]
    pub fn scale_for(&self, volatility: f64) -> f64 {
        let soft = self.soft_limit();
        if !self.enabled || volatility <= soft {
            return 1.0;
        }
        let span = self.max_volatility - soft;
        if span <= 0.0 {
            return MIN_SCALE;
        }
        let excess = ((volatility - soft) / span).clamp(0.0, 1.0);
        1.0 - (1.0 - MIN_SCALE) * excess
    }

    /// Scale `candidate` down for the window's volatility, never below the floor.
    #[must_use]
    pub fn adjust(&self, candidate: Stake, window: &OutcomeWindow, bounds: &StakeBounds) -> Stake {
        if !self.enabled {
            return candidate;
        }
        let volatility = normalized_volatility(window);
        let scale = self.scale_for(volatility);
        if scale >= 1.0 {
            return candidate;
        }

        let factor = Decimal::try_from(scale).unwrap_or(Decimal::ONE);
        let adjusted = (candidate * factor).round_dp(STAKE_DP).max(bounds.floor);
        debug!(
            volatility,
            scale,
            candidate = %candidate,
            adjusted = %adjusted,
            "Stake shrunk for volatility"
        );
        adjusted
    }
}
