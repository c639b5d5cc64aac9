//! Numeric helpers shared by the validator and formatter.

/// Tolerance for deciding whether an offset is a whole number of steps.
pub const MULTIPLE_TOLERANCE: f64 = 1e-5;
/// Tolerance used when deriving fraction digits from the step granularity.
pub const FRACTION_TOLERANCE: f64 = 1e-5;
/// Upper bound on derived fraction digits; f64 precision runs out well below this.
pub const MAX_FRACTION_DIGITS: usize = 10;

/// True when `offset` is a whole multiple of `step` within [`MULTIPLE_TOLERANCE`].
/// Requires `step > 0`; non-finite offsets are never multiples.
#[inline]
pub fn is_step_multiple(offset: f64, step: f64) -> bool {
    if !offset.is_finite() {
        return false;
    }
    let q = offset / step;
    (q - q.round()).abs() <= MULTIPLE_TOLERANCE
}

/// Largest `anchor + n * step` not above `value` (n integer). Offsets already
/// within tolerance of a multiple are kept on that multiple rather than
/// pushed a full step down by floating error.
#[inline]
pub fn snap_down_to_multiple(value: f64, anchor: f64, step: f64) -> f64 {
    let q = (value - anchor) / step;
    let n = if (q - q.round()).abs() <= MULTIPLE_TOLERANCE {
        q.round()
    } else {
        q.floor()
    };
    anchor + n * step
}

/// Round to `digits` decimal places, half away from zero.
#[inline]
pub fn round_to_digits(value: f64, digits: usize) -> f64 {
    let scale = 10f64.powi(digits.min(MAX_FRACTION_DIGITS) as i32);
    (value * scale).round() / scale
}
