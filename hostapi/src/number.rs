//! Number parsing for input and number rendering for output.
//!
//! Input accepts any finite decimal number, including fractions and
//! exponents, and floors it to an integer. `0x`, `0o` and `0b` integer
//! literals are accepted, and a blank line reads as zero. This holds in
//! every run mode.

use std::fmt::{Display, LowerExp};

use crate::error::HostError;

/// Parse a line as a finite number. Surrounding whitespace is ignored and
/// a blank line is zero.
///
/// The error carries the line exactly as given.
pub fn parse_number(text: &str) -> Result<f64, HostError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }
    if let Some(literal) = parse_radix_literal(text) {
        return literal.map(|value| value as f64);
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(HostError::InvalidNumber(text.to_owned())),
    }
}

/// Parse `0x1f`, `0o17` or `0b101` (either letter case). `None` when the
/// line has no such prefix. Signs are not allowed in front of a prefix.
fn parse_radix_literal(text: &str) -> Option<Result<i128, HostError>> {
    let trimmed = text.trim();
    let radix = match trimmed.get(..2)? {
        "0x" | "0X" => 16,
        "0o" | "0O" => 8,
        "0b" | "0B" => 2,
        _ => return None,
    };
    let digits = &trimmed[2..];
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Some(Err(HostError::InvalidNumber(text.to_owned())));
    }
    Some(i128::from_str_radix(digits, radix).map_err(|_| HostError::OutOfRange(text.to_owned())))
}

/// Parse and floor to a wide integer. Integer text is taken exactly, so
/// large i64 values do not lose precision through `f64`.
fn parse_floored(text: &str) -> Result<i128, HostError> {
    if let Ok(value) = text.trim().parse::<i128>() {
        return Ok(value);
    }
    if let Some(literal) = parse_radix_literal(text) {
        return literal;
    }
    // `as` saturates, so out-of-range values fail the narrowing below.
    Ok(parse_number(text)?.floor() as i128)
}

/// Parse an input line into an `i32`, flooring fractional values.
pub fn parse_i32(text: &str) -> Result<i32, HostError> {
    i32::try_from(parse_floored(text)?).map_err(|_| HostError::OutOfRange(text.to_owned()))
}

/// Parse an input line into an `i64`, flooring fractional values.
pub fn parse_i64(text: &str) -> Result<i64, HostError> {
    i64::try_from(parse_floored(text)?).map_err(|_| HostError::OutOfRange(text.to_owned()))
}

fn non_finite(value: f64) -> Option<&'static str> {
    if value.is_nan() {
        Some("NaN")
    } else if value == f64::INFINITY {
        Some("Infinity")
    } else if value == f64::NEG_INFINITY {
        Some("-Infinity")
    } else {
        None
    }
}

/// Positional notation between 1e-6 and 1e21, exponent form outside it
/// (`1e+21`, `1.5e-7`). Zero of either sign prints as `0`.
fn render<T: Display + LowerExp>(value: T, magnitude: f64) -> String {
    if magnitude == 0.0 {
        return "0".to_owned();
    }
    if (1e-6..1e21).contains(&magnitude) {
        return value.to_string();
    }
    let exp = format!("{:e}", value);
    match exp.split_once('e') {
        Some((mantissa, power)) if !power.starts_with('-') => {
            format!("{}e+{}", mantissa, power)
        }
        _ => exp,
    }
}

/// Render an `f32`. Integral values have no fractional part (`7.0` → `7`).
pub fn format_f32(value: f32) -> String {
    match non_finite(value.into()) {
        Some(s) => s.to_owned(),
        None => render(value, f64::from(value).abs()),
    }
}

/// Render an `f64`. Integral values have no fractional part (`7.0` → `7`).
pub fn format_f64(value: f64) -> String {
    match non_finite(value) {
        Some(s) => s.to_owned(),
        None => render(value, value.abs()),
    }
}

/// Render a boolean the way the guest language spells it.
pub fn format_bool(value: i32) -> &'static str {
    if value != 0 {
        "True"
    } else {
        "False"
    }
}
