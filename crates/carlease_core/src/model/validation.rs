//! Input validation shared by the domain records.

use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex")
});

/// Rejected write input. Values that may carry personal data are omitted.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Text field is empty after trim.
    BlankField(&'static str),
    /// Number is NaN, infinite or negative.
    InvalidAmount { field: &'static str, value: f64 },
    /// Integer must be strictly positive.
    NotPositive(&'static str),
    /// E-mail does not look like `local@domain.tld`.
    InvalidEmail,
    /// Lease end is earlier than its start.
    EndBeforeStart { start: i64, end: i64 },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankField(field) => write!(f, "`{field}` must not be blank"),
            Self::InvalidAmount { field, value } => {
                write!(f, "`{field}` must be a finite non-negative number, got {value}")
            }
            Self::NotPositive(field) => write!(f, "`{field}` must be greater than zero"),
            Self::InvalidEmail => write!(f, "`email` is not a valid e-mail address"),
            Self::EndBeforeStart { start, end } => {
                write!(f, "lease end {end} is earlier than start {start}")
            }
        }
    }
}

impl Error for ValidationError {}

pub(crate) fn require_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::BlankField(field));
    }
    Ok(())
}

pub(crate) fn require_amount(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ValidationError::InvalidAmount { field, value });
    }
    Ok(())
}

pub(crate) fn require_email(value: &str) -> Result<(), ValidationError> {
    if !EMAIL_RE.is_match(value.trim()) {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}
