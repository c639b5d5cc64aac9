#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
//! Config schemas for the stepper control.
//!
//! `Config` and sub-structs are deserialized from TOML and validated.
//! Every table and field has a default, so a missing file or empty
//! document yields a usable unbounded stepper with step 1.

use serde::Deserialize;

/// Optional inclusive bounds on the value.
#[derive(Debug, Deserialize, Default, Clone, Copy)]
#[serde(default)]
pub struct LimitsCfg {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

#[derive(Debug, Deserialize, Clone, Copy)]
#[serde(default)]
pub struct SteppingCfg {
    /// Granularity applied per activation. Must be finite and > 0.
    pub step: f64,
    /// Repeat-press tick interval in milliseconds. Must be > 0.
    pub repeat_interval_ms: u64,
    /// Starting value; defaults to the minimum limit (or 0) when absent.
    pub initial: Option<f64>,
}

impl Default for SteppingCfg {
    fn default() -> Self {
        Self {
            step: 1.0,
            repeat_interval_ms: 200,
            initial: None,
        }
    }
}

#[derive(Debug, Deserialize, Default, Clone, Copy)]
#[serde(default)]
pub struct DisplayCfg {
    /// Decimal places always shown, even when trailing zeros.
    pub min_fraction_digits: usize,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Logging {
    pub file: Option<String>,  // path to .log (JSON lines)
    pub level: Option<String>, // "info","debug"
    /// Log rotation policy: "never" | "daily" | "hourly" (default: never)
    pub rotation: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub limits: LimitsCfg,
    pub stepping: SteppingCfg,
    pub display: DisplayCfg,
    pub logging: Logging,
}

pub fn load_toml(s: &str) -> Result<Config, toml::de::Error> {
    toml::from_str::<Config>(s)
}

impl Config {
    /// Enforce the configuration contract. Violations here are caller
    /// errors reported before a stepper is ever built.
    pub fn validate(&self) -> eyre::Result<()> {
        if !(self.stepping.step.is_finite() && self.stepping.step > 0.0) {
            eyre::bail!("stepping.step must be > 0");
        }
        if self.stepping.repeat_interval_ms == 0 {
            eyre::bail!("stepping.repeat_interval_ms must be > 0");
        }
        if let (Some(lo), Some(hi)) = (self.limits.min, self.limits.max)
            && lo > hi
        {
            eyre::bail!("limits.min must be <= limits.max");
        }
        for (name, value) in [
            ("limits.min", self.limits.min),
            ("limits.max", self.limits.max),
            ("stepping.initial", self.stepping.initial),
        ] {
            if value.is_some_and(|v| !v.is_finite()) {
                eyre::bail!("{name} must be finite");
            }
        }
        if let Some(rotation) = self.logging.rotation.as_deref()
            && !matches!(rotation, "never" | "daily" | "hourly")
        {
            eyre::bail!("logging.rotation must be one of never|daily|hourly");
        }
        Ok(())
    }
}
