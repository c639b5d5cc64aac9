//! The validation decision engine.
//!
//! Every function here is pure and takes the current `(limits, step)`
//! configuration explicitly. Nothing is cached between calls, so a stepper
//! can never consult bounds that are out of date with its configuration.

use std::ops::Range;

use thiserror::Error;

use crate::format;
use crate::limits::Limits;
use crate::util;

/// Recoverable user-input conditions. These are reported to the shell and
/// resolved locally with [`correct_value`]; they are never panics.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("incorrect symbols")]
    IncorrectSymbols,
    #[error("crossed the maximum limit")]
    CrossedMax,
    #[error("crossed the minimum limit")]
    CrossedMin,
    #[error("not a multiple of the step")]
    NonMultiple,
}

/// Outcome of validating a committed value or text.
pub type Validation = Result<(), ValidationError>;

/// Decision over an in-progress text edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditDecision {
    /// Apply the edit verbatim.
    Allow,
    /// Reject the edit, optionally naming why. The text stays unchanged.
    Deny(Option<ValidationError>),
    /// Reject the edit and show transformed replacement text instead.
    /// Reserved for normalizing policies; the default policy never emits it.
    Substitute(String),
}

/// Validate a committed numeric value against limits and step alignment.
///
/// Checks run in a fixed order: max, then min, then step multiplicity.
/// The multiplicity modulus is anchored at the minimum limit so a non-zero
/// minimum still produces a valid step lattice (min, min+step, ...).
pub fn check_value(limits: Limits, step: f64, value: f64) -> Validation {
    if !value.is_finite() {
        return Err(ValidationError::IncorrectSymbols);
    }
    if !limits.contains_for_max(value) {
        return Err(ValidationError::CrossedMax);
    }
    if !limits.contains_for_min(value) {
        return Err(ValidationError::CrossedMin);
    }
    if !util::is_step_multiple(value - limits.anchor(), step) {
        return Err(ValidationError::NonMultiple);
    }
    Ok(())
}

/// Validate committed raw text. Empty text counts as `0` for this check;
/// anything that does not parse as a finite number is `IncorrectSymbols`.
pub fn check_text(limits: Limits, step: f64, text: &str) -> Validation {
    let text = if text.is_empty() { "0" } else { text };
    match format::parse(text) {
        Some(value) => check_value(limits, step, value),
        None => Err(ValidationError::IncorrectSymbols),
    }
}

/// True when one step up from `value` stays within the maximum.
#[inline]
pub fn can_step_up(limits: Limits, step: f64, value: f64) -> bool {
    limits.contains_for_max(value + step)
}

/// True when one step down from `value` stays within the minimum.
#[inline]
pub fn can_step_down(limits: Limits, step: f64, value: f64) -> bool {
    limits.contains_for_min(value - step)
}

/// Deterministic repair for a failed [`check_value`]/[`check_text`].
///
/// `CrossedMax`/`CrossedMin` clamp to the respective limit (the contract
/// says that limit is set whenever the error fires; the input value is
/// returned unchanged rather than panicking if it is not). `NonMultiple`
/// snaps down to the last valid multiple on the min-anchored lattice, which
/// keeps the repair idempotent. `IncorrectSymbols` falls back to `min`
/// (or 0 when unbounded).
pub fn correct_value(limits: Limits, step: f64, value: f64, error: ValidationError) -> f64 {
    match error {
        ValidationError::CrossedMax => limits.max.unwrap_or(value),
        ValidationError::CrossedMin => limits.min.unwrap_or(value),
        ValidationError::NonMultiple => util::snap_down_to_multiple(value, limits.anchor(), step),
        ValidationError::IncorrectSymbols => limits.anchor(),
    }
}

/// Decide whether an in-progress edit of `current` is acceptable.
///
/// Intentionally more permissive than [`check_value`]: shapely but
/// incomplete intermediates (empty text, a lone `-`, a trailing `.`) are
/// allowed so the user can keep typing, and only the maximum is enforced
/// early. Full validation happens at commit time. A malformed replace range
/// is denied rather than panicking.
pub fn should_accept_edit(
    limits: Limits,
    current: &str,
    range: Range<usize>,
    inserted: &str,
) -> EditDecision {
    let Some(candidate) = apply_edit(current, range, inserted) else {
        return EditDecision::Deny(Some(ValidationError::IncorrectSymbols));
    };
    if !is_numeric_shape(&candidate) {
        return EditDecision::Deny(Some(ValidationError::IncorrectSymbols));
    }
    if is_incomplete_number(&candidate) {
        return EditDecision::Allow;
    }
    let Some(value) = format::parse(&candidate) else {
        return EditDecision::Deny(Some(ValidationError::IncorrectSymbols));
    };
    if !limits.contains_for_max(value) {
        return EditDecision::Deny(Some(ValidationError::CrossedMax));
    }
    EditDecision::Allow
}

/// User-facing message for a validation error, naming the violated bound.
pub fn error_message(limits: Limits, step: f64, error: ValidationError) -> String {
    match error {
        ValidationError::CrossedMax => match limits.max {
            Some(max) => std::format!("amount must be equal or less than {max}"),
            None => "amount crossed the maximum limit".to_string(),
        },
        ValidationError::CrossedMin => match limits.min {
            Some(min) => std::format!("amount must be equal or higher than {min}"),
            None => "amount crossed the minimum limit".to_string(),
        },
        ValidationError::NonMultiple => std::format!("amount must be multiple of {step}"),
        ValidationError::IncorrectSymbols => "incorrect symbols".to_string(),
    }
}

/// Splice `inserted` into `current` over `range`. `None` when the range is
/// out of bounds or not on character boundaries.
fn apply_edit(current: &str, range: Range<usize>, inserted: &str) -> Option<String> {
    if range.start > range.end || range.end > current.len() {
        return None;
    }
    if !current.is_char_boundary(range.start) || !current.is_char_boundary(range.end) {
        return None;
    }
    let mut out = String::with_capacity(current.len() + inserted.len());
    out.push_str(&current[..range.start]);
    out.push_str(inserted);
    out.push_str(&current[range.end..]);
    Some(out)
}

/// Optional leading `-`, at most one `.`, decimal digits everywhere else.
fn is_numeric_shape(text: &str) -> bool {
    let rest = text.strip_prefix('-').unwrap_or(text);
    let mut seen_point = false;
    for c in rest.chars() {
        match c {
            '.' if !seen_point => seen_point = true,
            '0'..='9' => {}
            _ => return false,
        }
    }
    true
}

/// Shapely text that is not yet a parseable number but may become one.
fn is_incomplete_number(text: &str) -> bool {
    matches!(text, "" | "-" | "." | "-.")
}
