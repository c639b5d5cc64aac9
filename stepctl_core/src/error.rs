use thiserror::Error;

/// Configuration-contract violations. These are programmer errors surfaced
/// when a stepper is built or reconfigured, never during event handling;
/// the runtime taxonomy lives in [`crate::validate::ValidationError`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("step must be a positive finite number")]
    StepNotPositive,
    #[error("min limit must be <= max limit")]
    MinAboveMax,
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
}

pub type Result<T> = eyre::Result<T>;
pub use eyre::Report;
