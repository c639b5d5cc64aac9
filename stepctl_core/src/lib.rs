#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
//! Core stepper-control logic (UI-agnostic).
//!
//! A stepper is a numeric text field flanked by increment/decrement
//! buttons: the value is bounded by optional min/max limits, moves on a
//! fixed step lattice, accelerates under a sustained press, and accepts
//! direct text editing with validation. This crate is the value/validation
//! state machine only; rendering and gesture recognition live in the shell
//! that drives it.
//!
//! ## Architecture
//!
//! - **Limits**: optional inclusive bounds with pure predicates (`limits`)
//! - **Validation**: pure decision engine over `(limits, step)` (`validate`)
//! - **Formatting**: grouped display text and raw-text parsing (`format`)
//! - **Acceleration**: repeat multiplier for sustained presses (`accel`)
//! - **State**: the orchestrating machine owning value and mode (`state`)
//! - **Ticker**: scoped repeat timer tied to the press gesture (`ticker`)
//!
//! All validator and formatter calls take the current configuration
//! explicitly; nothing caches limits or step between calls.

pub mod accel;
pub mod error;
pub mod format;
pub mod limits;
pub mod mocks;
pub mod state;
pub mod ticker;
pub mod util;
pub mod validate;

pub use accel::{Acceleration, MAX_MULTIPLIER};
pub use error::{ConfigError, Result};
pub use limits::Limits;
pub use state::{DEFAULT_REPEAT_INTERVAL, Direction, Observer, Stepper, StepperBuilder};
pub use ticker::{PressSession, RepeatTicker};
pub use validate::{EditDecision, Validation, ValidationError};
