//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`config`] - Canonical strategy configurations.
//! - [`domain`] - Outcome builders and helpers that drive a strategy through
//!   scripted results.

pub mod config;
pub mod domain;
