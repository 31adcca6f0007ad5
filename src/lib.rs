//! Stakeguard - stake sizing and risk gating for binary-outcome trading.
//!
//! Before every trade the engine answers two questions: may a trade be
//! placed at all, and with what stake. After the trade settles, the realized
//! outcome is fed back and the engine updates its state and statistics.
//!
//! # Architecture
//!
//! - **`application::risk`** - Ordered veto gates (inactive, loss limit,
//!   profit lock, daily limit, recovery exhaustion, volatility, win rate)
//! - **`domain::policy`** - Pluggable stake policies
//!   - `MultiplicativeRecoveryPolicy` - Size the next stake to recoup losses
//!   - `FixedProgressionPolicy` - 1-3-2-6 multiples of the base stake
//! - **`application::volatility`** - Shrinks stakes as recent outcomes get erratic
//! - **`domain::Ledger`** - Engine state and cumulative statistics
//! - **`application::Strategy`** - The facade tying it together
//!
//! # Modules
//!
//! - [`config`] - Configuration loading from TOML files
//! - [`domain`] - Outcomes, decisions, state, policies
//! - [`application`] - Risk gates, volatility adjustment, the strategy facade
//! - [`replay`] - Scripted outcome replay
//! - [`cli`] - Command-line interface
//! - [`error`] - Error types for the crate
//!
//! # Example
//!
//! ```no_run
//! use stakeguard::application::Strategy;
//! use stakeguard::config::StrategyConfig;
//!
//! let mut strategy = Strategy::new(StrategyConfig::default()).unwrap();
//! let decision = strategy.prepare_for_next_trade();
//! if decision.should_trade {
//!     strategy.update_state(false, -1.0).unwrap();
//! }
//! ```

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod replay;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
