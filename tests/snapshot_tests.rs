//! Persisting and restoring a session.

use rust_decimal_macros::dec;
use stakeguard::application::{Strategy, StrategySnapshot};
use stakeguard::config::{PolicyKind, StrategyConfig};
use stakeguard::error::ConfigError;
use stakeguard::testkit;

#[test]
fn snapshot_round_trips_through_json() {
    let mut strategy = Strategy::new(testkit::config::strategy()).unwrap();
    testkit::domain::play(&mut strategy, &[-10.0, -12.5, 4.0, -3.0]);
    strategy.set_trades_today(7);

    let json = strategy.snapshot().to_json().unwrap();
    let snapshot = StrategySnapshot::from_json(&json).unwrap();
    let restored = Strategy::restore(testkit::config::strategy(), snapshot).unwrap();

    assert_eq!(restored.current_state(), strategy.current_state());
    assert_eq!(restored.statistics(), strategy.statistics());
    assert_eq!(
        restored.prepare_for_next_trade(),
        strategy.prepare_for_next_trade()
    );
}

#[test]
fn restored_session_continues_recovery() {
    let mut strategy = Strategy::new(testkit::config::strategy()).unwrap();
    strategy.update_state(false, -20.0).unwrap();
    let snapshot = strategy.snapshot();

    let mut restored = Strategy::restore(testkit::config::strategy(), snapshot).unwrap();
    assert!(restored.current_state().in_recovery);

    restored.update_state(true, 40.0).unwrap();
    assert!(!restored.current_state().in_recovery);
    assert_eq!(restored.statistics().successful_recoveries, 1);
}

#[test]
fn restore_clamps_stake_to_new_ceiling() {
    let mut strategy = Strategy::new(testkit::config::strategy()).unwrap();
    strategy.update_state(false, -30.0).unwrap();
    assert!(strategy.current_state().current_stake > dec!(15));

    let tighter = StrategyConfig {
        max_stake_multiplier: dec!(3),
        ..testkit::config::strategy()
    };
    let restored = Strategy::restore(tighter, strategy.snapshot()).unwrap();
    assert_eq!(restored.current_state().current_stake, dec!(15));
}

#[test]
fn restore_resizes_history_window() {
    let mut strategy = Strategy::new(testkit::config::strategy()).unwrap();
    testkit::domain::play(&mut strategy, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);

    let smaller = StrategyConfig {
        history_window: 3,
        ..testkit::config::strategy()
    };
    let restored = Strategy::restore(smaller, strategy.snapshot()).unwrap();
    let recent = restored.current_state().recent;
    assert_eq!(recent.capacity(), 3);
    assert_eq!(recent.profits(), vec![4.0, 5.0, 6.0]);
}

#[test]
fn restore_rejects_other_policy() {
    let strategy = Strategy::new(testkit::config::progression()).unwrap();
    let snapshot = strategy.snapshot();
    assert_eq!(snapshot.policy, PolicyKind::Progression);

    let err = Strategy::restore(testkit::config::strategy(), snapshot).err();
    assert!(matches!(err, Some(ConfigError::InvalidValue { field: "policy", .. })));
}

#[test]
fn snapshot_is_detached_from_engine() {
    let mut strategy = Strategy::new(testkit::config::strategy()).unwrap();
    let snapshot = strategy.snapshot();
    strategy.update_state(false, -5.0).unwrap();

    assert_eq!(snapshot.state.total_profit, dec!(0));
    assert_eq!(snapshot.statistics.total_losses, 0);
}
