//! Write-time validation errors and hand-entered input parsing.
//!
//! # Responsibility
//! - Describe every reason a record is refused before persistence.
//! - Parse user-typed metric text into a finite value.
//!
//! # Invariants
//! - Validation errors are surfaced to callers, never silently dropped.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Reason a record or input was refused.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Record id is empty or whitespace.
    EmptyId,
    /// An in-place edit tried to change the record id.
    IdChanged(String),
    /// A required text field is empty or whitespace.
    EmptyField(&'static str),
    /// A numeric field holds NaN or infinity.
    NonFiniteValue(&'static str),
    /// Hand-entered metric text is not a decimal number.
    InvalidMetricValue(String),
    /// Mood intensity outside `1..=10`.
    IntensityOutOfRange(u8),
    /// Goal target must be strictly positive.
    NonPositiveTarget(f64),
    /// Goal ends before it starts.
    InvalidDateRange { start: i64, end: i64 },
    /// Amount must be strictly positive (water volume, reminder interval).
    NonPositiveAmount(&'static str),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId => write!(f, "record id cannot be empty"),
            Self::IdChanged(id) => write!(f, "record id `{id}` cannot be changed in place"),
            Self::EmptyField(field) => write!(f, "`{field}` cannot be empty"),
            Self::NonFiniteValue(field) => write!(f, "`{field}` must be a finite number"),
            Self::InvalidMetricValue(text) => {
                write!(f, "`{text}` is not a valid numeric value")
            }
            Self::IntensityOutOfRange(value) => {
                write!(f, "intensity {value} is outside the 1-10 scale")
            }
            Self::NonPositiveTarget(value) => {
                write!(f, "goal target must be positive, got {value}")
            }
            Self::InvalidDateRange { start, end } => {
                write!(f, "end {end} must not be earlier than start {start}")
            }
            Self::NonPositiveAmount(field) => write!(f, "`{field}` must be positive"),
        }
    }
}

impl Error for ValidationError {}

/// Parses hand-entered metric text such as `" 72.5 "`.
///
/// # Errors
/// - `InvalidMetricValue` when the trimmed text is empty, non-numeric, or
///   parses to NaN/infinity.
pub fn parse_metric_value(text: &str) -> Result<f64, ValidationError> {
    let trimmed = text.trim();
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ValidationError::InvalidMetricValue(trimmed.to_string())),
    }
}

pub(crate) fn require_id(id: &str) -> Result<(), ValidationError> {
    if id.trim().is_empty() {
        return Err(ValidationError::EmptyId);
    }
    Ok(())
}

pub(crate) fn require_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyField(field));
    }
    Ok(())
}

pub(crate) fn require_finite(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteValue(field));
    }
    Ok(())
}
