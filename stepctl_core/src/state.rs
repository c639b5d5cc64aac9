//! The stepper state machine.
//!
//! `Stepper` owns the authoritative value, the editing mode, and the press
//! lifecycle, and wires the validator, formatter, and acceleration together
//! in response to shell events (taps, press begin/tick/end, text edits).
//! Validation outcomes are delivered to an observer closure installed at
//! build time; there is no global delegate.

use std::ops::Range;
use std::time::Duration;

use eyre::Report;

use crate::accel::Acceleration;
use crate::error::{ConfigError, Result};
use crate::format;
use crate::limits::Limits;
use crate::validate::{self, EditDecision, Validation, ValidationError};

/// Default repeat-press tick interval.
pub const DEFAULT_REPEAT_INTERVAL: Duration = Duration::from_millis(200);

/// Which button an event came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    #[inline]
    fn signum(self) -> f64 {
        match self {
            Direction::Up => 1.0,
            Direction::Down => -1.0,
        }
    }
}

/// Callback receiving validation outcomes as they happen: every non-Ok
/// commit/step result, plus Ok on edit-begin and on each accepted edit so
/// the shell can clear stale error feedback.
pub type Observer = Box<dyn FnMut(Validation)>;

pub struct Stepper {
    limits: Limits,
    step: f64,
    value: f64,
    min_fraction_digits: usize,
    max_fraction_digits: usize,
    repeat_interval: Duration,
    editing: bool,
    raw_text: String,
    display_text: String,
    pressing: Option<Direction>,
    accel: Acceleration,
    observer: Option<Observer>,
}

impl core::fmt::Debug for Stepper {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Stepper")
            .field("value", &self.value)
            .field("step", &self.step)
            .field("limits", &self.limits)
            .field("editing", &self.editing)
            .field("pressing", &self.pressing)
            .finish()
    }
}

impl Stepper {
    /// Start building a stepper.
    pub fn builder() -> StepperBuilder {
        StepperBuilder::new()
    }

    // ── Outputs ──────────────────────────────────────────────────────────

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Text the shell should display: raw ungrouped text while editing,
    /// formatted grouped text otherwise.
    pub fn display_text(&self) -> &str {
        &self.display_text
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    /// True while a press gesture is in progress. Shells driving a repeat
    /// ticker should stop pumping once this goes false.
    pub fn press_active(&self) -> bool {
        self.pressing.is_some()
    }

    pub fn can_step_up(&self) -> bool {
        validate::can_step_up(self.limits, self.step, self.value)
    }

    pub fn can_step_down(&self) -> bool {
        validate::can_step_down(self.limits, self.step, self.value)
    }

    pub fn limits(&self) -> Limits {
        self.limits
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn repeat_interval(&self) -> Duration {
        self.repeat_interval
    }

    /// User-facing message for a validation error, naming the violated
    /// bound or step under the current configuration.
    pub fn error_message(&self, error: ValidationError) -> String {
        validate::error_message(self.limits, self.step, error)
    }

    // ── Buttons ──────────────────────────────────────────────────────────

    /// Single discrete activation: one step at multiplier 1.
    pub fn tap(&mut self, direction: Direction) {
        self.apply_step(direction, 1);
    }

    /// Sustained press started. Any outstanding press is finished first so
    /// two gestures can never overlap, then one step fires immediately.
    pub fn press_begin(&mut self, direction: Direction) {
        if self.pressing.is_some() {
            self.press_end();
        }
        self.pressing = Some(direction);
        self.apply_step(direction, 1);
    }

    /// Repeat tick while a press is held: one step at the current
    /// multiplier, then the multiplier advances. Ticks that arrive outside
    /// an active press in the same direction (notably after a hard-limit
    /// abort) are dropped.
    pub fn press_tick(&mut self, direction: Direction) {
        if self.pressing != Some(direction) {
            tracing::trace!(?direction, "dropping press tick without active press");
            return;
        }
        let multiplier = self.accel.multiplier();
        self.apply_step(direction, multiplier);
        if self.pressing.is_some() {
            self.accel.tick();
        }
    }

    /// Press gesture ended: acceleration resets, state returns to idle.
    pub fn press_end(&mut self) {
        self.accel.reset();
        self.pressing = None;
    }

    // ── Editing ──────────────────────────────────────────────────────────

    /// Text field gained focus: switch the display to the raw ungrouped
    /// form and clear any prior error feedback in the shell.
    pub fn edit_begin(&mut self) {
        if self.editing {
            return;
        }
        self.editing = true;
        self.raw_text = format::strip_grouping(&self.display_text);
        self.render();
        self.notify(Ok(()));
    }

    /// Proposed replacement of `range` in the current raw text with
    /// `inserted`. Returns whether the edit was applied. Denials leave the
    /// text unchanged and report the reason through the observer.
    pub fn edit_candidate(&mut self, range: Range<usize>, inserted: &str) -> bool {
        if !self.editing {
            tracing::warn!("edit candidate outside editing mode ignored");
            return false;
        }
        match validate::should_accept_edit(self.limits, &self.raw_text, range.clone(), inserted) {
            EditDecision::Allow => {
                self.raw_text.replace_range(range, inserted);
                self.render();
                self.notify(Ok(()));
                true
            }
            EditDecision::Deny(kind) => {
                if let Some(error) = kind {
                    self.notify(Err(error));
                }
                false
            }
            EditDecision::Substitute(text) => {
                self.raw_text = text;
                self.render();
                false
            }
        }
    }

    /// Focus lost or return pressed: leave editing, validate the raw text,
    /// correct the value if needed, and reformat to grouped display text.
    pub fn edit_commit(&mut self) {
        if !self.editing {
            return;
        }
        self.editing = false;
        let committed = if self.raw_text.is_empty() {
            "0".to_string()
        } else {
            std::mem::take(&mut self.raw_text)
        };
        match validate::check_text(self.limits, self.step, &committed) {
            Ok(()) => {
                if let Some(value) = format::parse(&committed) {
                    self.value = value;
                }
            }
            Err(error) => {
                let proposed = format::parse(&committed).unwrap_or(self.value);
                let corrected = validate::correct_value(self.limits, self.step, proposed, error);
                tracing::debug!(text = %committed, corrected, %error, "commit corrected");
                self.value = corrected;
                self.notify(Err(error));
            }
        }
        self.raw_text.clear();
        self.render();
    }

    // ── Configuration ────────────────────────────────────────────────────

    /// Replace the limits. Re-validates the current value synchronously
    /// (committing any in-progress edit first) and re-renders; a correction
    /// is reported through the observer like any other validation failure.
    pub fn set_limits(&mut self, min: Option<f64>, max: Option<f64>) -> Result<()> {
        let limits = Limits::new(min, max);
        if !limits.is_finite() {
            return Err(Report::new(ConfigError::InvalidConfig("limits must be finite")));
        }
        if !limits.is_ordered() {
            return Err(Report::new(ConfigError::MinAboveMax));
        }
        self.limits = limits;
        tracing::debug!(?min, ?max, "limits updated");
        self.revalidate();
        Ok(())
    }

    /// Replace the step. Re-derives the display fraction digits from the
    /// new granularity, then re-validates and re-renders like
    /// [`Stepper::set_limits`].
    pub fn set_step(&mut self, step: f64) -> Result<()> {
        if !(step.is_finite() && step > 0.0) {
            return Err(Report::new(ConfigError::StepNotPositive));
        }
        self.step = step;
        self.max_fraction_digits = format::fraction_digits_for_step(step);
        tracing::debug!(step, "step updated");
        self.revalidate();
        Ok(())
    }

    // ── Internals ────────────────────────────────────────────────────────

    /// Ends editing (committing in-progress text) before mutating, applies
    /// the delta, then runs the post-mutation policy.
    fn apply_step(&mut self, direction: Direction, multiplier: u32) {
        if self.editing {
            self.edit_commit();
        }
        self.value += self.step * f64::from(multiplier) * direction.signum();
        tracing::trace!(value = self.value, multiplier, ?direction, "step applied");
        self.settle_after_mutation();
    }

    fn revalidate(&mut self) {
        if self.editing {
            self.edit_commit();
        }
        self.settle_after_mutation();
    }

    /// Post-mutation policy: a limit crossing snaps to the limit and aborts
    /// any in-progress press; step misalignment snaps down without
    /// aborting. Recomputes display text either way.
    fn settle_after_mutation(&mut self) {
        if let Err(error) = validate::check_value(self.limits, self.step, self.value) {
            let corrected = validate::correct_value(self.limits, self.step, self.value, error);
            tracing::debug!(from = self.value, to = corrected, %error, "value corrected");
            self.value = corrected;
            if matches!(
                error,
                ValidationError::CrossedMax | ValidationError::CrossedMin
            ) {
                self.abort_press();
            }
            self.notify(Err(error));
        }
        self.render();
    }

    /// Crossing a hard limit always terminates continuous stepping.
    fn abort_press(&mut self) {
        if self.pressing.take().is_some() {
            tracing::debug!("press aborted at limit");
        }
        self.accel.reset();
    }

    fn render(&mut self) {
        if self.editing {
            self.display_text.clone_from(&self.raw_text);
        } else {
            self.display_text =
                format::format(self.value, self.min_fraction_digits, self.max_fraction_digits);
        }
    }

    fn notify(&mut self, outcome: Validation) {
        if let Some(observer) = self.observer.as_mut() {
            observer(outcome);
        }
    }
}

/// Builder for [`Stepper`]. Configuration is validated on `build()`.
pub struct StepperBuilder {
    limits: Limits,
    step: f64,
    initial: Option<f64>,
    min_fraction_digits: usize,
    repeat_interval: Duration,
    observer: Option<Observer>,
}

impl Default for StepperBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl StepperBuilder {
    pub fn new() -> Self {
        Self {
            limits: Limits::unbounded(),
            step: 1.0,
            initial: None,
            min_fraction_digits: 0,
            repeat_interval: DEFAULT_REPEAT_INTERVAL,
            observer: None,
        }
    }

    pub fn with_limits(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.limits = Limits::new(min, max);
        self
    }

    pub fn with_step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }

    /// Starting value. Defaults to the minimum limit (or 0). Taken as-is:
    /// the value lifecycle only validates on mutation, so a caller may seed
    /// state that predates the current configuration.
    pub fn with_initial(mut self, value: f64) -> Self {
        self.initial = Some(value);
        self
    }

    /// Decimal places always shown, even when trailing zeros.
    pub fn with_min_fraction_digits(mut self, digits: usize) -> Self {
        self.min_fraction_digits = digits;
        self
    }

    pub fn with_repeat_interval(mut self, interval: Duration) -> Self {
        self.repeat_interval = interval;
        self
    }

    pub fn with_observer<F>(mut self, observer: F) -> Self
    where
        F: FnMut(Validation) + 'static,
    {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Validate the configuration contract and build.
    pub fn build(self) -> Result<Stepper> {
        if !(self.step.is_finite() && self.step > 0.0) {
            return Err(Report::new(ConfigError::StepNotPositive));
        }
        if !self.limits.is_finite() {
            return Err(Report::new(ConfigError::InvalidConfig("limits must be finite")));
        }
        if !self.limits.is_ordered() {
            return Err(Report::new(ConfigError::MinAboveMax));
        }
        if self.initial.is_some_and(|v| !v.is_finite()) {
            return Err(Report::new(ConfigError::InvalidConfig(
                "initial value must be finite",
            )));
        }
        if self.repeat_interval.is_zero() {
            return Err(Report::new(ConfigError::InvalidConfig(
                "repeat interval must be > 0",
            )));
        }

        let value = self.initial.unwrap_or_else(|| self.limits.anchor());
        let mut stepper = Stepper {
            limits: self.limits,
            step: self.step,
            value,
            min_fraction_digits: self.min_fraction_digits,
            max_fraction_digits: format::fraction_digits_for_step(self.step),
            repeat_interval: self.repeat_interval,
            editing: false,
            raw_text: String::new(),
            display_text: String::new(),
            pressing: None,
            accel: Acceleration::new(),
            observer: self.observer,
        };
        stepper.render();
        Ok(stepper)
    }
}
