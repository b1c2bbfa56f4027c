// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use time::Date;
use time::macros::format_description;

pub const DATE_LAYOUT: &str = "YYYY-MM-DD";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    InvalidNumber,
    InvalidDate,
    MissingValue,
    MissingSecondValue,
    NoOptionChosen,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidNumber => f.write_str("invalid number"),
            Self::InvalidDate => write!(f, "invalid date, use {DATE_LAYOUT}"),
            Self::MissingValue => f.write_str("value required"),
            Self::MissingSecondValue => f.write_str("second value required"),
            Self::NoOptionChosen => f.write_str("choose at least one option"),
        }
    }
}

impl std::error::Error for ValidationError {}

pub type ValidationResult<T> = std::result::Result<T, ValidationError>;

/// Parses a decimal the way filter inputs are typed: surrounding whitespace
/// and thousands separators are ignored, a leading `$` is allowed.
pub fn parse_decimal(input: &str) -> ValidationResult<f64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::InvalidNumber);
    }
    let clean = trimmed.replace(',', "");
    let (sign, unsigned) = match clean.strip_prefix('-') {
        Some(rest) => (-1.0, rest),
        None => (1.0, clean.as_str()),
    };
    let unsigned = unsigned.strip_prefix('$').unwrap_or(unsigned);
    if unsigned.is_empty() || unsigned.starts_with(['+', '-']) {
        return Err(ValidationError::InvalidNumber);
    }
    let value = unsigned
        .parse::<f64>()
        .map_err(|_| ValidationError::InvalidNumber)?;
    if !value.is_finite() {
        return Err(ValidationError::InvalidNumber);
    }
    Ok(sign * value)
}

pub fn parse_date(input: &str) -> ValidationResult<Date> {
    Date::parse(input.trim(), &format_description!("[year]-[month]-[day]"))
        .map_err(|_| ValidationError::InvalidDate)
}

pub fn format_date(value: Date) -> String {
    value.to_string()
}

/// Renders a number without a trailing `.0` when it is integral.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_owned();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_owned();
    }
    if value.fract() == 0.0 && value.abs() < 1e15 {
        return format!("{}", value as i64);
    }
    format!("{value}")
}
