//! Gate abstraction and the ordered pipeline that runs it.

use tracing::warn;

use super::gates::{
    DailyTradeLimitGate, InactivityGate, LossLimitGate, ProfitLockGate, RecoveryExhaustionGate,
    VolatilityGate, WinRateGate,
};
use crate::config::StrategyConfig;
use crate::domain::{EngineState, StopReason};

/// Everything a gate may look at.
#[derive(Debug, Clone, Copy)]
pub struct GateContext<'a> {
    pub config: &'a StrategyConfig,
    pub state: &'a EngineState,
}

impl<'a> GateContext<'a> {
    #[must_use]
    pub const fn new(config: &'a StrategyConfig, state: &'a EngineState) -> Self {
        Self { config, state }
    }
}

/// A stateless veto on the next trade.
pub trait RiskGate: Send + Sync {
    /// Unique identifier used in logs.
    fn name(&self) -> &'static str;

    /// `Err` vetoes the trade with the given reason.
    fn check(&self, ctx: &GateContext<'_>) -> Result<(), StopReason>;
}

/// Gates evaluated in registration order; the first refusal wins.
#[derive(Default)]
pub struct GatePipeline {
    gates: Vec<Box<dyn RiskGate>>,
}

impl GatePipeline {
    /// Create an empty pipeline.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The engine's pipeline: inactivity, loss limit, profit lock, daily
    /// trade limit, recovery exhaustion, volatility, win rate.
    #[must_use]
    pub fn standard() -> Self {
        let mut pipeline = Self::new();
        pipeline.register(Box::new(InactivityGate));
        pipeline.register(Box::new(LossLimitGate));
        pipeline.register(Box::new(ProfitLockGate));
        pipeline.register(Box::new(DailyTradeLimitGate));
        pipeline.register(Box::new(RecoveryExhaustionGate));
        pipeline.register(Box::new(VolatilityGate));
        pipeline.register(Box::new(WinRateGate));
        pipeline
    }

    /// Append a gate; it runs after every gate registered before it.
    pub fn register(&mut self, gate: Box<dyn RiskGate>) {
        self.gates.push(gate);
    }

    /// Gate names in evaluation order.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.gates.iter().map(|g| g.name()).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.gates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    /// Run every gate in order, stopping at the first refusal.
    ///
    /// # Errors
    ///
    /// Returns the [`StopReason`] of the first gate that refuses.
    pub fn evaluate(&self, ctx: &GateContext<'_>) -> Result<(), StopReason> {
        for gate in &self.gates {
            if let Err(reason) = gate.check(ctx) {
                warn!(
                    gate = gate.name(),
                    stop = reason.as_str(),
                    reason = %reason,
                    "Trade vetoed"
                );
                return Err(reason);
            }
        }
        Ok(())
    }
}
