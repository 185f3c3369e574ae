//! Value Validation
//!
//! Per-data-type checks producing the structured rejection reasons of the
//! protocol. Every check reports the first violation it finds; the manager
//! maps the rejection straight into a per-item result.

use super::registry::VariableMetadata;
use crate::ocpp::ReasonCode;
use regex::Regex;

/// A failed validation: reason code plus human-readable detail
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub reason: ReasonCode,
    pub info: String,
}

impl Rejection {
    pub fn new(reason: ReasonCode, info: impl Into<String>) -> Self {
        Self {
            reason,
            info: info.into(),
        }
    }
}

fn is_integer_literal(s: &str) -> bool {
    let digits = s.strip_prefix('-').unwrap_or(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

fn is_decimal_literal(s: &str) -> bool {
    match s.split_once('.') {
        Some((int_part, frac_part)) => {
            let int_digits = int_part.strip_prefix('-').unwrap_or(int_part);
            !int_digits.is_empty()
                && int_digits.bytes().all(|b| b.is_ascii_digit())
                && !frac_part.is_empty()
                && frac_part.bytes().all(|b| b.is_ascii_digit())
        }
        None => false,
    }
}

/// Integer format and static-bound checks, shared with the `MinSet`/`MaxSet`
/// write path. A decimal literal gets its own rejection so the central
/// system can tell "3.5" apart from "abc".
pub fn validate_integer(meta: &VariableMetadata, value: &str) -> Result<i64, Rejection> {
    if is_decimal_literal(value) {
        return Err(Rejection::new(
            ReasonCode::InvalidValue,
            format!("{} must not be decimal", meta.variable),
        ));
    }
    if !is_integer_literal(value) {
        return Err(Rejection::new(
            ReasonCode::InvalidValue,
            format!("{} must be an integer", meta.variable),
        ));
    }
    let parsed: i64 = value.parse().map_err(|_| {
        Rejection::new(
            ReasonCode::InvalidValue,
            format!("{} is out of integer range", meta.variable),
        )
    })?;

    if let Some(min) = meta.min {
        if parsed < min {
            return Err(Rejection::new(
                ReasonCode::ValueTooLow,
                format!("Minimum allowed value is {min}"),
            ));
        }
    }
    if let Some(max) = meta.max {
        if parsed > max {
            return Err(Rejection::new(
                ReasonCode::ValueTooHigh,
                format!("Maximum allowed value is {max}"),
            ));
        }
    }
    Ok(parsed)
}

fn validate_decimal(meta: &VariableMetadata, value: &str) -> Result<(), Rejection> {
    let parsed: f64 = value.parse().map_err(|_| {
        Rejection::new(
            ReasonCode::InvalidValue,
            format!("{} must be a number", meta.variable),
        )
    })?;
    if !parsed.is_finite() {
        return Err(Rejection::new(
            ReasonCode::InvalidValue,
            format!("{} must be a finite number", meta.variable),
        ));
    }

    if let Some(min) = meta.min {
        if parsed < min as f64 {
            return Err(Rejection::new(
                ReasonCode::ValueTooLow,
                format!("Minimum allowed value is {min}"),
            ));
        }
    }
    if let Some(max) = meta.max {
        if parsed > max as f64 {
            return Err(Rejection::new(
                ReasonCode::ValueTooHigh,
                format!("Maximum allowed value is {max}"),
            ));
        }
    }
    Ok(())
}

fn validate_boolean(meta: &VariableMetadata, value: &str) -> Result<(), Rejection> {
    if value == "true" || value == "false" {
        Ok(())
    } else {
        Err(Rejection::new(
            ReasonCode::InvalidValue,
            format!("{} must be \"true\" or \"false\"", meta.variable),
        ))
    }
}

fn validate_date_time(meta: &VariableMetadata, value: &str) -> Result<(), Rejection> {
    chrono::DateTime::parse_from_rfc3339(value)
        .map(|_| ())
        .map_err(|_| {
            Rejection::new(
                ReasonCode::InvalidValue,
                format!("{} must be an ISO-8601 date-time", meta.variable),
            )
        })
}

fn validate_option(meta: &VariableMetadata, value: &str) -> Result<(), Rejection> {
    if meta
        .enum_values
        .iter()
        .any(|allowed| allowed.eq_ignore_ascii_case(value))
    {
        Ok(())
    } else {
        Err(Rejection::new(
            ReasonCode::InvalidValue,
            format!(
                "{} must be one of {}",
                meta.variable,
                meta.enum_values.join(", ")
            ),
        ))
    }
}

/// Shared by `SequenceList` (order significant) and `MemberList` (order
/// irrelevant): every comma-separated token must be an allowed value and
/// duplicates are forbidden in both shapes.
fn validate_list(meta: &VariableMetadata, value: &str) -> Result<(), Rejection> {
    let tokens: Vec<&str> = value.split(',').map(str::trim).collect();

    for token in &tokens {
        if token.is_empty() {
            return Err(Rejection::new(
                ReasonCode::InvalidValue,
                format!("{} contains an empty entry", meta.variable),
            ));
        }
        if !meta
            .enum_values
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(token))
        {
            return Err(Rejection::new(
                ReasonCode::InvalidValue,
                format!("{} is not an allowed value of {}", token, meta.variable),
            ));
        }
    }

    for (i, token) in tokens.iter().enumerate() {
        if tokens[..i]
            .iter()
            .any(|seen| seen.eq_ignore_ascii_case(token))
        {
            return Err(Rejection::new(
                ReasonCode::InvalidValue,
                format!("{} contains duplicate entries", meta.variable),
            ));
        }
    }
    Ok(())
}

fn validate_string(meta: &VariableMetadata, value: &str) -> Result<(), Rejection> {
    let Some(pattern) = meta.pattern else {
        return Ok(());
    };
    let regex = Regex::new(pattern).map_err(|_| {
        Rejection::new(
            ReasonCode::InternalError,
            format!("{} has an invalid validation pattern", meta.variable),
        )
    })?;
    if regex.is_match(value) {
        Ok(())
    } else {
        Err(Rejection::new(
            ReasonCode::InvalidValue,
            format!("{} does not match the required pattern", meta.variable),
        ))
    }
}

/// Validate a candidate `Actual`/`Target` value against the entry's data type.
pub fn validate_value(meta: &VariableMetadata, value: &str) -> Result<(), Rejection> {
    use crate::ocpp::DataType::*;

    match meta.data_type {
        Integer => validate_integer(meta, value).map(|_| ()),
        Decimal => validate_decimal(meta, value),
        Boolean => validate_boolean(meta, value),
        DateTime => validate_date_time(meta, value),
        OptionList => validate_option(meta, value),
        SequenceList | MemberList => validate_list(meta, value),
        String => validate_string(meta, value),
    }
}
