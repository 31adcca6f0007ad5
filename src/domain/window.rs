//! Bounded window of recent trade outcomes.

use std::collections::VecDeque;

use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use super::outcome::TradeOutcome;

/// Fixed-capacity ring of the most recent outcomes; the oldest entry is
/// dropped when a push would overflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeWindow {
    capacity: usize,
    entries: VecDeque<TradeOutcome>,
}

impl OutcomeWindow {
    /// Create an empty window. A zero capacity is raised to one.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            entries: VecDeque::with_capacity(capacity),
        }
    }

    /// Build a window from outcomes in chronological order, keeping only the
    /// newest `capacity` of them.
    #[must_use]
    pub fn from_outcomes<I>(capacity: usize, outcomes: I) -> Self
    where
        I: IntoIterator<Item = TradeOutcome>,
    {
        let mut window = Self::new(capacity);
        for outcome in outcomes {
            window.push(outcome);
        }
        window
    }

    /// Append an outcome, returning the evicted one if the window was full.
    pub fn push(&mut self, outcome: TradeOutcome) -> Option<TradeOutcome> {
        let evicted = if self.entries.len() == self.capacity {
            self.entries.pop_front()
        } else {
            None
        };
        self.entries.push_back(outcome);
        evicted
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.entries.len() == self.capacity
    }

    /// Oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &TradeOutcome> {
        self.entries.iter()
    }

    /// Realized profits as floats, oldest first.
    #[must_use]
    pub fn profits(&self) -> Vec<f64> {
        self.entries
            .iter()
            .map(|o| o.profit().to_f64().unwrap_or(0.0))
            .collect()
    }

    /// Fraction of winning entries, `None` when empty.
    #[must_use]
    pub fn win_rate(&self) -> Option<f64> {
        if self.entries.is_empty() {
            return None;
        }
        let wins = self.entries.iter().filter(|o| o.is_win()).count();
        Some(wins as f64 / self.entries.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_drops_oldest_on_overflow() {
        let mut window = OutcomeWindow::new(3);
        for profit in [dec!(1), dec!(-2), dec!(3)] {
            assert!(window.push(TradeOutcome::from_profit(profit)).is_none());
        }
        assert!(window.is_full());

        let evicted = window.push(TradeOutcome::from_profit(dec!(4)));

        assert_eq!(evicted.map(|o| o.profit()), Some(dec!(1)));
        assert_eq!(window.len(), 3);
        assert_eq!(window.profits(), vec![-2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_from_outcomes_keeps_newest() {
        let window = OutcomeWindow::from_outcomes(
            2,
            [dec!(1), dec!(2), dec!(3)].map(TradeOutcome::from_profit),
        );
        assert_eq!(window.profits(), vec![2.0, 3.0]);
    }

    #[test]
    fn test_win_rate() {
        let mut window = OutcomeWindow::new(4);
        assert_eq!(window.win_rate(), None);

        for profit in [dec!(1), dec!(-1), dec!(-1), dec!(1)] {
            window.push(TradeOutcome::from_profit(profit));
        }
        assert_eq!(window.win_rate(), Some(0.5));
    }

    #[test]
    fn test_zero_capacity_is_raised() {
        let mut window = OutcomeWindow::new(0);
        window.push(TradeOutcome::from_profit(dec!(1)));
        window.push(TradeOutcome::from_profit(dec!(2)));
        assert_eq!(window.capacity(), 1);
        assert_eq!(window.profits(), vec![2.0]);
    }
}
