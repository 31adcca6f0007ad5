//! Risk gates.
//!
//! Stateless veto predicates evaluated in a fixed order before every trade;
//! the first refusal is terminal and supplies the decision's reason.

mod gate;
mod gates;

pub use gate::{GateContext, GatePipeline, RiskGate};
pub use gates::{
    DailyTradeLimitGate, InactivityGate, LossLimitGate, ProfitLockGate, RecoveryExhaustionGate,
    VolatilityGate, WinRateGate,
};
