use std::path::Path;

use super::output::{self, Mark};
use crate::config::Config;
use crate::error::Result;

/// Validate a configuration file without running the engine.
pub fn execute_config<P: AsRef<Path>>(config_path: P) -> Result<()> {
    let path = config_path.as_ref();
    println!("Checking configuration: {}", path.display());

    let config = Config::load(path)?;
    output::mark(Mark::Pass, "Configuration file is valid");

    let strategy = &config.strategy;
    output::heading("Strategy");
    output::field("Policy", strategy.policy.as_str());
    output::field("Initial stake", strategy.initial_stake);
    output::field("Stake ceiling", strategy.max_stake());
    output::field("Profit target", strategy.profit_threshold);
    output::field("Profit lock level", strategy.profit_lock_level());
    output::field("Loss limit", strategy.loss_threshold);
    output::field("Max recovery attempts", strategy.max_recovery_attempts);
    if strategy.max_daily_trades == 0 {
        output::field("Max daily trades", "unlimited");
    } else {
        output::field("Max daily trades", strategy.max_daily_trades);
    }
    output::field("History window", strategy.history_window);

    output::heading("Contract");
    output::field("Type", &strategy.contract.contract_type);
    output::field("Market", &strategy.contract.market);
    if let Some(prediction) = &strategy.contract.prediction {
        output::field("Prediction", prediction);
    }

    if !strategy.risk.enable_recovery {
        output::mark(
            Mark::Caution,
            "Recovery escalation is disabled; losses will not raise the stake",
        );
    }
    if strategy.risk.enable_auto_adjust {
        output::field("Max volatility", strategy.risk.max_volatility);
        output::mark(
            Mark::Caution,
            "A volatility veto holds until the outcome window is reset or replaced",
        );
    } else if strategy.risk.min_win_rate > 0.0 {
        output::mark(
            Mark::Caution,
            "min_win_rate only applies when enable_auto_adjust is set",
        );
    }

    println!();
    println!("Configuration is ready to use.");
    Ok(())
}
