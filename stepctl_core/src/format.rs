//! Value/text conversion with locale-stable separators.
//!
//! Display text always uses `.` as the decimal point and `,` as the
//! thousands separator regardless of process locale, so parse/format is a
//! stable round trip on any machine.

use crate::util;

/// Thousands separator in display text.
pub const GROUPING_SEPARATOR: char = ',';
/// Decimal point in display and raw text.
pub const DECIMAL_POINT: char = '.';

/// Render `value` with grouping, at most `max_fraction_digits` decimal
/// places, and trailing zeros trimmed down to `min_fraction_digits`.
pub fn format(value: f64, min_fraction_digits: usize, max_fraction_digits: usize) -> String {
    let max_digits = max_fraction_digits
        .max(min_fraction_digits)
        .min(util::MAX_FRACTION_DIGITS);
    let mut rounded = util::round_to_digits(value, max_digits);
    if rounded == 0.0 {
        // normalize -0.0 so "-0" never reaches the display
        rounded = 0.0;
    }
    let fixed = std::format!("{rounded:.max_digits$}");
    let (sign, unsigned) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed.as_str()),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((int, frac)) => (int, frac),
        None => (unsigned, ""),
    };
    let frac = trim_fraction(frac_part, min_fraction_digits);
    let grouped = group_thousands(int_part);

    let mut out = String::with_capacity(sign.len() + grouped.len() + 1 + frac.len());
    out.push_str(sign);
    out.push_str(&grouped);
    if !frac.is_empty() {
        out.push(DECIMAL_POINT);
        out.push_str(frac);
    }
    out
}

/// Inverse of [`format`]: strips grouping separators and parses. Returns
/// `None` for empty, malformed, or non-finite input.
pub fn parse(text: &str) -> Option<f64> {
    let cleaned = strip_grouping(text);
    let value: f64 = cleaned.parse().ok()?;
    value.is_finite().then_some(value)
}

/// Remove grouping separators, yielding the raw editing form of the text.
pub fn strip_grouping(text: &str) -> String {
    text.chars().filter(|c| *c != GROUPING_SEPARATOR).collect()
}

/// Smallest number of decimal places `d` such that `step * 10^d` is an
/// integer within tolerance. Keeps displayed precision consistent with the
/// step granularity (step 0.25 shows 2 digits, step 10 shows none).
pub fn fraction_digits_for_step(step: f64) -> usize {
    if !step.is_finite() {
        return 0;
    }
    let mut scaled = step;
    let mut digits = 0;
    while digits < util::MAX_FRACTION_DIGITS
        && (scaled - scaled.round()).abs() > util::FRACTION_TOLERANCE
    {
        scaled *= 10.0;
        digits += 1;
    }
    digits
}

fn trim_fraction(frac: &str, min_digits: usize) -> &str {
    let keep = frac.trim_end_matches('0').len().max(min_digits.min(frac.len()));
    &frac[..keep]
}

fn group_thousands(digits: &str) -> String {
    let bytes = digits.as_bytes();
    let mut out = String::with_capacity(bytes.len() + bytes.len() / 3);
    for (i, b) in bytes.iter().enumerate() {
        if i != 0 && (bytes.len() - i) % 3 == 0 {
            out.push(GROUPING_SEPARATOR);
        }
        out.push(char::from(*b));
    }
    out
}
