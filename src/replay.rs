//! Scripted replay of trade outcomes through a [`Strategy`].
//!
//! A script is plain text, one step per line:
//!
//! ```text
//! # comments and blank lines are ignored
//! win 9.5
//! loss -5
//! new-day
//! reset
//! ```
//!
//! Every `win`/`loss` line asks the engine for a decision first; the outcome
//! is only applied when the engine approved the trade.

use serde::Serialize;
use tracing::info;

use crate::application::{PerformanceReport, Strategy};
use crate::domain::{Decision, EngineState};
use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq)]
pub enum ScriptStep {
    Outcome { is_win: bool, profit: f64 },
    NewDay,
    Reset,
}

/// A parsed step with its 1-based source line.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptLine {
    pub line: usize,
    pub step: ScriptStep,
}

/// Parse a replay script.
///
/// # Errors
///
/// Returns [`Error::Parse`] naming the first malformed line.
pub fn parse_script(script: &str) -> Result<Vec<ScriptLine>> {
    let mut steps = Vec::new();
    for (idx, raw) in script.lines().enumerate() {
        let line = idx + 1;
        let text = raw.split('#').next().unwrap_or("").trim();
        if text.is_empty() {
            continue;
        }

        let mut parts = text.split_whitespace();
        let keyword = parts.next().unwrap_or_default().to_ascii_lowercase();
        let step = match keyword.as_str() {
            "win" | "loss" => {
                let value = parts
                    .next()
                    .ok_or_else(|| Error::Parse(format!("line {line}: missing profit")))?;
                let profit: f64 = value.parse().map_err(|_| {
                    Error::Parse(format!("line {line}: invalid profit '{value}'"))
                })?;
                ScriptStep::Outcome {
                    is_win: keyword == "win",
                    profit,
                }
            }
            "new-day" => ScriptStep::NewDay,
            "reset" => ScriptStep::Reset,
            other => {
                return Err(Error::Parse(format!("line {line}: unknown step '{other}'")));
            }
        };
        if let Some(extra) = parts.next() {
            return Err(Error::Parse(format!(
                "line {line}: unexpected trailing '{extra}'"
            )));
        }
        steps.push(ScriptLine { line, step });
    }
    Ok(steps)
}

/// One engine decision taken during a replay.
#[derive(Debug, Clone, Serialize)]
pub struct ReplayEntry {
    pub line: usize,
    pub decision: Decision,
    /// Realized profit applied, `None` when the trade was refused.
    pub applied: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReplayReport {
    pub entries: Vec<ReplayEntry>,
    pub refused: usize,
    pub performance: PerformanceReport,
    pub final_state: EngineState,
}

/// Drive `strategy` through `steps`.
///
/// # Errors
///
/// Returns [`Error::Outcome`] if a scripted profit is rejected by the engine.
pub fn run(strategy: &mut Strategy, steps: &[ScriptLine]) -> Result<ReplayReport> {
    let mut entries = Vec::new();
    let mut refused = 0;

    for ScriptLine { line, step } in steps {
        match *step {
            ScriptStep::Outcome { is_win, profit } => {
                let decision = strategy.prepare_for_next_trade();
                let applied = if decision.should_trade {
                    strategy.update_state(is_win, profit)?;
                    Some(profit)
                } else {
                    refused += 1;
                    None
                };
                entries.push(ReplayEntry {
                    line: *line,
                    decision,
                    applied,
                });
            }
            ScriptStep::NewDay => strategy.reset_daily(),
            ScriptStep::Reset => strategy.reset_strategy(),
        }
    }

    let report = ReplayReport {
        refused,
        performance: strategy.analyze_performance(),
        final_state: strategy.current_state(),
        entries,
    };
    info!(
        decisions = report.entries.len(),
        refused = report.refused,
        net_profit = %report.performance.net_profit,
        "Replay finished"
    );
    Ok(report)
}
