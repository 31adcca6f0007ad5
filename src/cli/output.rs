//! Operator-facing text for `check` and `replay`.
//!
//! Formatting lives in pure `fn -> String` helpers so it can be unit tested;
//! the printing wrappers only choose the stream.

use std::fmt::Display;

use crate::replay::ReplayEntry;

const LABEL_WIDTH: usize = 22;

/// Status marker in front of a one-line verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    Pass,
    Caution,
    Fail,
}

impl Mark {
    const fn symbol(self) -> char {
        match self {
            Self::Pass => '✓',
            Self::Caution => '⚠',
            Self::Fail => '✗',
        }
    }
}

/// Print a verdict line; failures go to stderr.
pub fn mark(kind: Mark, message: &str) {
    let line = format!("{} {message}", kind.symbol());
    if kind == Mark::Fail {
        eprintln!("{line}");
    } else {
        println!("{line}");
    }
}

/// Print a titled block header.
pub fn heading(title: &str) {
    println!();
    println!("{title}");
    println!("{}", "─".repeat(title.chars().count().max(LABEL_WIDTH * 2)));
}

/// Print one aligned `label value` row.
pub fn field(label: &str, value: impl Display) {
    println!("{label:<width$} {value}", width = LABEL_WIDTH);
}

/// One replay decision as `line N  stake S  result P` or `line N  refused: R`.
#[must_use]
pub fn decision_line(entry: &ReplayEntry) -> String {
    match (entry.decision.amount, entry.applied) {
        (Some(amount), Some(profit)) => {
            format!("line {:>4}  stake {amount:>10}  result {profit:+}", entry.line)
        }
        _ => format!(
            "line {:>4}  refused: {}",
            entry.line,
            entry.decision.reason.as_deref().unwrap_or("-")
        ),
    }
}

/// Render an optional ratio as a percentage, `-` when absent.
#[must_use]
pub fn percent(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.1}%", v * 100.0))
}

/// `part / whole`, e.g. successful recoveries over attempts.
#[must_use]
pub fn ratio(part: impl Display, whole: impl Display) -> String {
    format!("{part} / {whole}")
}
