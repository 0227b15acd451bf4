//! Validation helpers and parsing utilities for command-line values.

use std::path::Path;
use std::time::Duration;

use crate::error::{ConfigError, ConfigResult};

const NANOS_PER_SECOND: u128 = 1_000_000_000;

/// Parse a duration written as `<number><unit>` terms, e.g. `5s`, `250ms`,
/// `1m30s` or `1.5h`. The bare value `0` is also accepted.
///
/// Supported units: `ns`, `us` (or `µs`), `ms`, `s`, `m`, `h`.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidDuration`] when the input is empty, negative,
/// lacks a unit, uses an unknown unit, or overflows.
pub fn parse_duration(input: &str) -> ConfigResult<Duration> {
    let invalid = |reason: &'static str| ConfigError::InvalidDuration {
        value: input.to_string(),
        reason,
    };

    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(invalid("empty duration"));
    }
    if trimmed.starts_with('-') {
        return Err(invalid("must not be negative"));
    }
    let mut remaining = trimmed.strip_prefix('+').unwrap_or(trimmed);
    if remaining == "0" {
        return Ok(Duration::ZERO);
    }

    let mut total: u128 = 0;
    while !remaining.is_empty() {
        let number_len = remaining
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(remaining.len());
        if number_len == 0 {
            return Err(invalid("expected a number"));
        }
        let (number, tail) = remaining.split_at(number_len);

        let unit_len = tail
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(tail.len());
        if unit_len == 0 {
            return Err(invalid("missing unit"));
        }
        let (unit, tail) = tail.split_at(unit_len);

        let scale = unit_nanos(unit).ok_or_else(|| invalid("unknown unit"))?;
        let term = term_nanos(number, scale).ok_or_else(|| invalid("malformed number"))?;
        total = total
            .checked_add(term)
            .ok_or_else(|| invalid("duration overflows"))?;
        remaining = tail;
    }

    let secs =
        u64::try_from(total / NANOS_PER_SECOND).map_err(|_| invalid("duration overflows"))?;
    let nanos =
        u32::try_from(total % NANOS_PER_SECOND).map_err(|_| invalid("duration overflows"))?;
    Ok(Duration::new(secs, nanos))
}

fn unit_nanos(unit: &str) -> Option<u128> {
    match unit {
        "ns" => Some(1),
        "us" | "\u{b5}s" | "\u{3bc}s" => Some(1_000),
        "ms" => Some(1_000_000),
        "s" => Some(NANOS_PER_SECOND),
        "m" => Some(60 * NANOS_PER_SECOND),
        "h" => Some(3_600 * NANOS_PER_SECOND),
        _ => None,
    }
}

fn term_nanos(number: &str, scale: u128) -> Option<u128> {
    let (whole, fraction) = number.split_once('.').unwrap_or((number, ""));
    if (whole.is_empty() && fraction.is_empty()) || fraction.contains('.') {
        return None;
    }

    let whole_value: u128 = if whole.is_empty() {
        0
    } else {
        whole.parse().ok()?
    };
    let mut total = whole_value.checked_mul(scale)?;

    // Digits past the unit's nanosecond resolution are dropped.
    let mut place = scale;
    for digit in fraction.chars() {
        place /= 10;
        let value = u128::from(digit.to_digit(10)?);
        total = total.checked_add(value * place)?;
    }
    Some(total)
}

pub(crate) fn validate_target_path(path: &Path) -> ConfigResult<()> {
    if path.as_os_str().is_empty() {
        return Err(ConfigError::MissingPath);
    }
    Ok(())
}
