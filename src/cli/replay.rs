use super::output::{self, Mark};
use super::ReplayArgs;
use crate::application::Strategy;
use crate::config::{Config, PolicyKind};
use crate::error::Result;
use crate::replay::{self, ReplayReport};

/// Load config and script, replay the script and print the outcome.
pub fn execute(args: &ReplayArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    apply_overrides(&mut config, args)?;
    config.init_logging();

    let script = std::fs::read_to_string(&args.script)?;
    let steps = replay::parse_script(&script)?;

    let mut strategy = Strategy::new(config.strategy)?;
    let report = replay::run(&mut strategy, &steps)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&report);
    }
    Ok(())
}

fn apply_overrides(config: &mut Config, args: &ReplayArgs) -> Result<()> {
    if let Some(policy) = &args.policy {
        config.strategy.policy = policy.parse::<PolicyKind>()?;
    }
    if let Some(level) = &args.log_level {
        config.logging.level.clone_from(level);
    }
    if args.json_logs {
        config.logging.format = "json".to_string();
    }
    Ok(())
}

fn print_summary(report: &ReplayReport) {
    output::heading("Decisions");
    for entry in &report.entries {
        println!("{}", output::decision_line(entry));
    }

    let perf = &report.performance;
    output::heading("Performance");
    output::field("Trades", perf.trades);
    output::field("Wins / losses", output::ratio(perf.wins, perf.losses));
    output::field("Win rate", output::percent(perf.win_rate));
    output::field("Net profit", perf.net_profit);
    output::field("Sequences completed", perf.sequences_completed);
    output::field(
        "Recoveries",
        output::ratio(perf.successful_recoveries, perf.recovery_attempts),
    );
    output::field("Refused", report.refused);

    let state = &report.final_state;
    output::heading("Final state");
    output::field("Next stake", state.current_stake);
    output::field("Total profit", state.total_profit);
    output::field("In recovery", state.in_recovery);
    if !state.active {
        output::mark(Mark::Caution, "Strategy finished inactive");
    }
}
