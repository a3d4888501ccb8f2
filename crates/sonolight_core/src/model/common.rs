//! Shared identifiers, validation errors and field checks.

use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier of every stored entity.
pub type RecordId = Uuid;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex")
});

#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    NilId { field: &'static str },
    BlankField { field: &'static str },
    InvalidEmail(String),
    DiscountOutOfRange { line: usize, value: f64 },
    NonFiniteQuantity { line: usize },
    LineLabelMissing { line: usize },
    EventEndsBeforeStart { date: String, end_date: String },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId { field } => write!(f, "{field} must not be the nil id"),
            Self::BlankField { field } => write!(f, "{field} must not be blank"),
            Self::InvalidEmail(value) => write!(f, "invalid email address `{value}`"),
            Self::DiscountOutOfRange { line, value } => {
                write!(f, "line {line}: remise_pct ({value}) must be within 0..=100")
            }
            Self::NonFiniteQuantity { line } => write!(f, "line {line}: qty must be finite"),
            Self::LineLabelMissing { line } => write!(f, "line {line}: label must not be blank"),
            Self::EventEndsBeforeStart { date, end_date } => {
                write!(f, "end_date ({end_date}) must be >= date ({date})")
            }
        }
    }
}

impl Error for ValidationError {}

pub(crate) fn require_id(field: &'static str, id: Uuid) -> Result<(), ValidationError> {
    if id.is_nil() {
        return Err(ValidationError::NilId { field });
    }
    Ok(())
}

pub(crate) fn require_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::BlankField { field });
    }
    Ok(())
}

/// Accepts `None`; rejects strings that are not shaped like `a@b.c`.
pub(crate) fn check_email(value: Option<&str>) -> Result<(), ValidationError> {
    match value {
        Some(email) if !EMAIL_RE.is_match(email.trim()) => {
            Err(ValidationError::InvalidEmail(email.to_string()))
        }
        _ => Ok(()),
    }
}

/// Formats integer cents as euros, e.g. `123456` -> `1234.56 €`.
pub fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{sign}{}.{:02} €", abs / 100, abs % 100)
}
