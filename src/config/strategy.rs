//! Staking strategy configuration.
//!
//! Values are gathered by the conversational front end and validated once,
//! before any [`Strategy`](crate::application::Strategy) is constructed.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::domain::{PROGRESSION, STAKE_DP};
use crate::error::ConfigError;

/// Largest supported recent-outcome window.
pub const MAX_HISTORY_WINDOW: usize = 100;

/// Stake policy selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyKind {
    /// Multiplicative loss recovery.
    #[default]
    Recovery,
    /// Fixed 1-3-2-6 progression.
    Progression,
}

impl PolicyKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Recovery => "recovery",
            Self::Progression => "progression",
        }
    }
}

impl std::str::FromStr for PolicyKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "recovery" => Ok(Self::Recovery),
            "progression" => Ok(Self::Progression),
            other => Err(ConfigError::invalid(
                "policy",
                format!("unknown policy '{other}', expected recovery or progression"),
            )),
        }
    }
}

/// Optional risk tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskTuning {
    /// Escalate stakes after a loss (recovery policy only).
    #[serde(default = "default_true")]
    pub enable_recovery: bool,
    /// Enable the volatility gate, the win-rate gate and stake shrinkage.
    #[serde(default)]
    pub enable_auto_adjust: bool,
    /// Normalized volatility above which trading is skipped (0-1).
    #[serde(default = "default_max_volatility")]
    pub max_volatility: f64,
    /// Minimum win fraction over a full window (0-1, 0 disables).
    #[serde(default)]
    pub min_win_rate: f64,
    /// Minimum trend strength required by the market-analysis collaborator (0-1).
    #[serde(default)]
    pub min_trend_strength: f64,
}

const fn default_true() -> bool {
    true
}

const fn default_max_volatility() -> f64 {
    0.5
}

impl Default for RiskTuning {
    fn default() -> Self {
        Self {
            enable_recovery: default_true(),
            enable_auto_adjust: false,
            max_volatility: default_max_volatility(),
            min_win_rate: 0.0,
            min_trend_strength: 0.0,
        }
    }
}

/// Contract selection copied onto every trade decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractConfig {
    #[serde(default = "default_contract_type")]
    pub contract_type: String,
    #[serde(default)]
    pub prediction: Option<String>,
    #[serde(default = "default_market")]
    pub market: String,
}

fn default_contract_type() -> String {
    "CALL".to_string()
}

fn default_market() -> String {
    "R_100".to_string()
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            contract_type: default_contract_type(),
            prediction: None,
            market: default_market(),
        }
    }
}

/// Engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyConfig {
    /// Base unit of risk.
    #[serde(default = "default_initial_stake")]
    pub initial_stake: Decimal,
    /// Cumulative profit target.
    #[serde(default = "default_threshold")]
    pub profit_threshold: Decimal,
    /// Cumulative loss (positive magnitude) at which trading stops.
    #[serde(default = "default_threshold")]
    pub loss_threshold: Decimal,
    /// Ceiling on consecutive recovery escalations.
    #[serde(default = "default_max_recovery_attempts")]
    pub max_recovery_attempts: u32,
    /// Ceiling on trades per day (0 = unlimited).
    #[serde(default = "default_max_daily_trades")]
    pub max_daily_trades: u32,
    /// Hard ceiling on stake relative to `initial_stake`.
    #[serde(default = "default_max_stake_multiplier")]
    pub max_stake_multiplier: Decimal,
    #[serde(default)]
    pub policy: PolicyKind,
    /// Payout per unit staked on a win (0.95 = 95%).
    #[serde(default = "default_payout_rate")]
    pub payout_rate: Decimal,
    /// Fraction of `profit_threshold` at which gains are locked.
    #[serde(default = "default_profit_lock_fraction")]
    pub profit_lock_fraction: Decimal,
    /// Number of recent outcomes kept for volatility analysis.
    #[serde(default = "default_history_window")]
    pub history_window: usize,
    #[serde(default)]
    pub risk: RiskTuning,
    #[serde(default)]
    pub contract: ContractConfig,
}

fn default_initial_stake() -> Decimal {
    Decimal::ONE
}

fn default_threshold() -> Decimal {
    Decimal::from(10)
}

const fn default_max_recovery_attempts() -> u32 {
    3
}

const fn default_max_daily_trades() -> u32 {
    50
}

fn default_max_stake_multiplier() -> Decimal {
    Decimal::from(10)
}

fn default_payout_rate() -> Decimal {
    Decimal::new(95, 2)
}

fn default_profit_lock_fraction() -> Decimal {
    Decimal::new(5, 1)
}

const fn default_history_window() -> usize {
    10
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            initial_stake: default_initial_stake(),
            profit_threshold: default_threshold(),
            loss_threshold: default_threshold(),
            max_recovery_attempts: default_max_recovery_attempts(),
            max_daily_trades: default_max_daily_trades(),
            max_stake_multiplier: default_max_stake_multiplier(),
            policy: PolicyKind::default(),
            payout_rate: default_payout_rate(),
            profit_lock_fraction: default_profit_lock_fraction(),
            history_window: default_history_window(),
            risk: RiskTuning::default(),
            contract: ContractConfig::default(),
        }
    }
}

impl StrategyConfig {
    /// Largest stake the engine will ever propose, truncated to whole cents.
    ///
    /// Saturates at `Decimal::MAX`; [`StrategyConfig::validate`] rejects
    /// configs where that would happen.
    #[must_use]
    pub fn max_stake(&self) -> Decimal {
        self.initial_stake
            .checked_mul(self.max_stake_multiplier)
            .unwrap_or(Decimal::MAX)
            .round_dp_with_strategy(STAKE_DP, RoundingStrategy::ToZero)
    }

    /// Profit level at which the profit lock engages.
    #[must_use]
    pub fn profit_lock_level(&self) -> Decimal {
        self.profit_threshold * self.profit_lock_fraction
    }

    /// Check every field against its allowed range.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first offending field,
    /// or [`ConfigError::MissingField`] for empty contract identifiers.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_stake <= Decimal::ZERO {
            return Err(ConfigError::invalid("initial_stake", "must be greater than 0"));
        }
        if self.initial_stake.normalize().scale() > STAKE_DP {
            return Err(ConfigError::invalid(
                "initial_stake",
                format!("must have at most {STAKE_DP} decimal places"),
            ));
        }
        let top_step = PROGRESSION.iter().copied().max().unwrap_or(1);
        if self.initial_stake.checked_mul(Decimal::from(top_step)).is_none() {
            return Err(ConfigError::invalid(
                "initial_stake",
                format!("too large: {top_step}x the stake overflows"),
            ));
        }
        if self.profit_threshold <= Decimal::ZERO {
            return Err(ConfigError::invalid(
                "profit_threshold",
                "must be greater than 0",
            ));
        }
        if self.loss_threshold <= Decimal::ZERO {
            return Err(ConfigError::invalid("loss_threshold", "must be greater than 0"));
        }
        if self.max_stake_multiplier < Decimal::ONE {
            return Err(ConfigError::invalid(
                "max_stake_multiplier",
                "must be 1 or greater",
            ));
        }
        if self.initial_stake.checked_mul(self.max_stake_multiplier).is_none() {
            return Err(ConfigError::invalid(
                "max_stake_multiplier",
                "initial_stake times max_stake_multiplier overflows",
            ));
        }
        if self.payout_rate <= Decimal::ZERO || self.payout_rate > Decimal::from(10) {
            return Err(ConfigError::invalid(
                "payout_rate",
                "must be greater than 0 and at most 10",
            ));
        }
        if self.profit_lock_fraction <= Decimal::ZERO || self.profit_lock_fraction > Decimal::ONE
        {
            return Err(ConfigError::invalid(
                "profit_lock_fraction",
                "must be greater than 0 and at most 1",
            ));
        }
        if !(2..=MAX_HISTORY_WINDOW).contains(&self.history_window) {
            return Err(ConfigError::invalid(
                "history_window",
                format!("must be between 2 and {MAX_HISTORY_WINDOW}"),
            ));
        }

        let risk = &self.risk;
        for (field, value) in [
            ("max_volatility", risk.max_volatility),
            ("min_win_rate", risk.min_win_rate),
            ("min_trend_strength", risk.min_trend_strength),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::invalid(field, "must be between 0 and 1"));
            }
        }

        if self.contract.contract_type.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "contract_type",
            });
        }
        if self.contract.market.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "market" });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn field_of(err: ConfigError) -> &'static str {
        match err {
            ConfigError::InvalidValue { field, .. } | ConfigError::MissingField { field } => field,
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!(" Progression ".parse::<PolicyKind>().unwrap(), PolicyKind::Progression);
        assert_eq!("recovery".parse::<PolicyKind>().unwrap(), PolicyKind::Recovery);
        assert_eq!(field_of("martingale".parse::<PolicyKind>().unwrap_err()), "policy");
    }

    #[test]
    fn test_default_is_valid() {
        assert!(StrategyConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_non_positive_stake() {
        let config = StrategyConfig {
            initial_stake: dec!(0),
            ..Default::default()
        };
        assert_eq!(field_of(config.validate().unwrap_err()), "initial_stake");
    }

    #[test]
    fn test_rejects_multiplier_below_one() {
        let config = StrategyConfig {
            max_stake_multiplier: dec!(0.99),
            ..Default::default()
        };
        assert_eq!(
            field_of(config.validate().unwrap_err()),
            "max_stake_multiplier"
        );
    }

    #[test]
    fn test_rejects_overflowing_stake_ceiling() {
        let config = StrategyConfig {
            initial_stake: Decimal::from(1_000_000_000_000_000_i64),
            max_stake_multiplier: Decimal::from(1_000_000_000_000_000_i64),
            profit_threshold: dec!(1000),
            loss_threshold: dec!(1000),
            ..Default::default()
        };
        assert_eq!(
            field_of(config.validate().unwrap_err()),
            "max_stake_multiplier"
        );
        assert_eq!(config.max_stake(), Decimal::MAX);
    }

    #[test]
    fn test_rejects_stake_whose_progression_overflows() {
        let config = StrategyConfig {
            initial_stake: Decimal::MAX / Decimal::from(4),
            max_stake_multiplier: dec!(1),
            ..Default::default()
        };
        assert_eq!(field_of(config.validate().unwrap_err()), "initial_stake");
    }

    #[test]
    fn test_rejects_sub_cent_stake() {
        let config = StrategyConfig {
            initial_stake: dec!(0.333),
            ..Default::default()
        };
        assert_eq!(field_of(config.validate().unwrap_err()), "initial_stake");

        let trailing_zeros = StrategyConfig {
            initial_stake: dec!(0.330),
            ..Default::default()
        };
        assert!(trailing_zeros.validate().is_ok());
    }

    #[test]
    fn test_ceiling_truncated_to_cents() {
        let config = StrategyConfig {
            initial_stake: dec!(0.33),
            max_stake_multiplier: dec!(1.5),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
        assert_eq!(config.max_stake(), dec!(0.49));
    }

    #[test]
    fn test_multiplier_of_one_is_allowed() {
        let config = StrategyConfig {
            max_stake_multiplier: dec!(1),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_volatility_out_of_range() {
        let mut config = StrategyConfig::default();
        config.risk.max_volatility = 1.5;
        assert_eq!(field_of(config.validate().unwrap_err()), "max_volatility");

        config.risk.max_volatility = f64::NAN;
        assert_eq!(field_of(config.validate().unwrap_err()), "max_volatility");
    }

    #[test]
    fn test_rejects_empty_contract_type() {
        let mut config = StrategyConfig::default();
        config.contract.contract_type = "  ".into();
        assert_eq!(field_of(config.validate().unwrap_err()), "contract_type");
    }

    #[test]
    fn test_derived_levels() {
        let config = StrategyConfig {
            initial_stake: dec!(5),
            profit_threshold: dec!(1000),
            max_stake_multiplier: dec!(8),
            ..Default::default()
        };
        assert_eq!(config.max_stake(), dec!(40));
        assert_eq!(config.profit_lock_level(), dec!(500));
    }
}
