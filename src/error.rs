use thiserror::Error;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field,
            reason: reason.into(),
        }
    }
}

/// Rejected trade outcomes.
///
/// Raised by [`TradeOutcome::new`](crate::domain::TradeOutcome::new) before
/// any engine state is touched, so a rejected update leaves the engine
/// exactly as it was.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OutcomeError {
    /// Realized profit was NaN or infinite.
    #[error("realized profit must be a finite number, got {value}")]
    NonFinite { value: f64 },

    /// Realized profit is finite but outside the decimal range.
    #[error("realized profit {value} cannot be represented as a decimal amount")]
    OutOfRange { value: f64 },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Outcome(#[from] OutcomeError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, Error>;
