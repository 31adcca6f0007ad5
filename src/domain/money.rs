//! Monetary types for stake and profit representation.

use rust_decimal::Decimal;

/// Stake represented as a Decimal for precision.
pub type Stake = Decimal;

/// Signed realized profit represented as a Decimal for precision.
pub type Profit = Decimal;

/// Decimal places brokers accept on a stake.
pub const STAKE_DP: u32 = 2;
