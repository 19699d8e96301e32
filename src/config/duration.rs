use serde::Deserialize;
use std::time::Duration;

use super::ConfigError;

/// A duration as it appears in config files: either a string such as
/// `"5s"` / `"1m30s"` or a bare number of nanoseconds.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum RawDuration {
    Text(String),
    Nanos(u64),
}

impl RawDuration {
    pub fn into_duration(self) -> Result<Duration, ConfigError> {
        match self {
            RawDuration::Text(text) => parse_duration(&text),
            RawDuration::Nanos(nanos) => Ok(Duration::from_nanos(nanos)),
        }
    }
}

fn unit_nanos(unit: &str) -> Option<u128> {
    match unit {
        "ns" => Some(1),
        "us" | "µs" | "μs" => Some(1_000),
        "ms" => Some(1_000_000),
        "s" => Some(1_000_000_000),
        "m" => Some(60 * 1_000_000_000),
        "h" => Some(3_600 * 1_000_000_000),
        _ => None,
    }
}

/// Parse a duration string made of one or more `<number><unit>` pairs,
/// e.g. `250ms`, `1.5s`, `1h2m3s`. A lone `0` is accepted as zero.
pub fn parse_duration(input: &str) -> Result<Duration, ConfigError> {
    let invalid = || ConfigError::InvalidDuration(input.to_string());

    let trimmed = input.trim();
    if trimmed == "0" {
        return Ok(Duration::ZERO);
    }
    if trimmed.is_empty() {
        return Err(invalid());
    }

    let mut rest = trimmed;
    let mut total: u128 = 0;

    while !rest.is_empty() {
        let number_end = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .ok_or_else(invalid)?;
        let (number, tail) = rest.split_at(number_end);
        if number.is_empty() || number == "." {
            return Err(invalid());
        }

        let unit_end = tail
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(tail.len());
        let (unit, tail) = tail.split_at(unit_end);
        let scale = unit_nanos(unit).ok_or_else(invalid)?;

        let (whole, fraction) = number.split_once('.').unwrap_or((number, ""));
        let whole: u128 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid())?
        };
        let mut value = whole.checked_mul(scale).ok_or_else(invalid)?;

        if !fraction.is_empty() {
            if !fraction.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            // Anything past 18 digits is below nanosecond precision.
            let digits = &fraction[..fraction.len().min(18)];
            let fraction_value: u128 = digits.parse().map_err(|_| invalid())?;
            value += fraction_value * scale / 10u128.pow(digits.len() as u32);
        }

        total = total.checked_add(value).ok_or_else(invalid)?;
        rest = tail;
    }

    u64::try_from(total)
        .map(Duration::from_nanos)
        .map_err(|_| invalid())
}
