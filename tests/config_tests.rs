use std::io::Write;

use rust_decimal_macros::dec;
use stakeguard::application::Strategy;
use stakeguard::config::{Config, PolicyKind, StrategyConfig};
use stakeguard::error::{ConfigError, Error};
use tempfile::NamedTempFile;

fn write_temp_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp config");
    file.write_all(contents.as_bytes()).expect("write temp config");
    file
}

#[test]
fn config_loads_full_document() {
    let toml = r#"
[logging]
level = "debug"
format = "json"

[strategy]
initial_stake = 2.5
profit_threshold = 100
loss_threshold = 40
max_recovery_attempts = 4
max_daily_trades = 0
max_stake_multiplier = 8
policy = "progression"
history_window = 20

[strategy.risk]
enable_auto_adjust = true
max_volatility = 0.4
min_win_rate = 0.35

[strategy.contract]
contract_type = "DIGITOVER"
prediction = "5"
market = "R_50"
"#;
    let file = write_temp_config(toml);
    let config = Config::load(file.path()).unwrap();

    assert_eq!(config.logging.format, "json");
    let strategy = &config.strategy;
    assert_eq!(strategy.initial_stake, dec!(2.5));
    assert_eq!(strategy.max_stake(), dec!(20));
    assert_eq!(strategy.profit_lock_level(), dec!(50));
    assert_eq!(strategy.policy, PolicyKind::Progression);
    assert_eq!(strategy.max_daily_trades, 0);
    assert!(strategy.risk.enable_recovery);
    assert_eq!(strategy.contract.prediction.as_deref(), Some("5"));

    let engine = Strategy::new(config.strategy).unwrap();
    assert_eq!(engine.policy_name(), "progression");
    let decision = engine.prepare_for_next_trade();
    assert_eq!(decision.amount, Some(dec!(2.5)));
    assert_eq!(decision.market.as_deref(), Some("R_50"));
}

#[test]
fn config_rejects_non_positive_stake() {
    let file = write_temp_config("[strategy]\ninitial_stake = 0\n");
    let err = Config::load(file.path()).unwrap_err();
    assert!(matches!(
        err,
        Error::Config(ConfigError::InvalidValue {
            field: "initial_stake",
            ..
        })
    ));
}

#[test]
fn config_rejects_multiplier_below_one() {
    let file = write_temp_config("[strategy]\nmax_stake_multiplier = 0.5\n");
    let err = Config::load(file.path()).unwrap_err();
    assert!(matches!(
        err,
        Error::Config(ConfigError::InvalidValue {
            field: "max_stake_multiplier",
            ..
        })
    ));
}

#[test]
fn config_rejects_out_of_range_volatility() {
    let file = write_temp_config("[strategy.risk]\nmax_volatility = 1.5\n");
    let err = Config::load(file.path()).unwrap_err();
    assert!(err.to_string().contains("max_volatility"));
}

#[test]
fn config_reports_missing_file() {
    let err = Config::load("/nonexistent/stakeguard.toml").unwrap_err();
    assert!(matches!(err, Error::Config(ConfigError::ReadFile(_))));
}

#[test]
fn config_reports_malformed_toml() {
    let file = write_temp_config("[strategy\ninitial_stake = 1\n");
    let err = Config::load(file.path()).unwrap_err();
    assert!(matches!(err, Error::Config(ConfigError::Parse(_))));
}

#[test]
fn engine_rejects_overflowing_stake_ceiling() {
    let config = StrategyConfig {
        initial_stake: dec!(1000000000000000),
        max_stake_multiplier: dec!(1000000000000000),
        ..Default::default()
    };
    let err = Strategy::new(config).err();
    assert!(matches!(
        err,
        Some(ConfigError::InvalidValue {
            field: "max_stake_multiplier",
            ..
        })
    ));
}

#[test]
fn config_rejects_sub_cent_stake() {
    let file = write_temp_config("[strategy]\ninitial_stake = 0.333\n");
    let err = Config::load(file.path()).unwrap_err();
    assert!(err.to_string().contains("initial_stake"));
}

#[test]
fn fractional_ceiling_keeps_stakes_in_cents() {
    let config = StrategyConfig {
        initial_stake: dec!(0.33),
        max_stake_multiplier: dec!(1.5),
        ..Default::default()
    };
    assert_eq!(config.max_stake(), dec!(0.49));

    let mut strategy = Strategy::new(config).unwrap();
    for _ in 0..2 {
        strategy.update_state(false, -0.33).unwrap();
        let amount = strategy.prepare_for_next_trade().amount.unwrap();
        assert!(amount <= dec!(0.49));
        assert!(amount.scale() <= 2, "{amount} has more than two decimals");
    }
}
