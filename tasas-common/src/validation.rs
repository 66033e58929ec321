//! Explicit per-entity validation
//!
//! Each draft entity exposes a `validate()` returning either `Ok(())` or a
//! [`ValidationError`] carrying every failing field. The helpers below are
//! the field-level checks those functions are built from.

use serde::Serialize;
use std::fmt;

/// One failing field and the reason it failed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Structured validation failure for one entity
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    pub errors: Vec<FieldError>,
}

impl ValidationError {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validation error with exactly one failing field
    pub fn single(field: &'static str, message: impl Into<String>) -> Self {
        let mut err = Self::new();
        err.push(field, message);
        err
    }

    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// True if any error refers to `field`
    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    /// Human-readable messages, one per failing field
    pub fn messages(&self) -> Vec<String> {
        self.errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect()
    }

    /// `Ok(())` when nothing was collected, `Err(self)` otherwise
    pub fn into_result(self) -> Result<(), ValidationError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.errors.is_empty() {
            return write!(f, "no validation errors");
        }
        write!(f, "{}", self.messages().join("; "))
    }
}

impl std::error::Error for ValidationError {}

/// Required text: present, non-blank, at most `max_len` characters
pub(crate) fn check_required(
    errors: &mut ValidationError,
    field: &'static str,
    value: Option<&str>,
    max_len: usize,
) {
    match value {
        None => errors.push(field, "This field is required"),
        Some(v) if v.trim().is_empty() => errors.push(field, "This field cannot be blank"),
        Some(v) => check_max_len(errors, field, v, max_len),
    }
}

/// Optional text: if present, at most `max_len` characters
pub(crate) fn check_optional(
    errors: &mut ValidationError,
    field: &'static str,
    value: Option<&str>,
    max_len: usize,
) {
    if let Some(v) = value {
        check_max_len(errors, field, v, max_len);
    }
}

fn check_max_len(errors: &mut ValidationError, field: &'static str, value: &str, max_len: usize) {
    let len = value.chars().count();
    if len > max_len {
        errors.push(
            field,
            format!("Ensure this value has at most {} characters (it has {})", max_len, len),
        );
    }
}

/// Optional URL: if present, must be an absolute http(s) URL
pub(crate) fn check_url(errors: &mut ValidationError, field: &'static str, value: Option<&str>) {
    let Some(raw) = value else {
        return;
    };

    match url::Url::parse(raw) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
        Ok(parsed) => errors.push(
            field,
            format!("Unsupported URL scheme '{}'", parsed.scheme()),
        ),
        Err(e) => errors.push(field, format!("Enter a valid URL ({})", e)),
    }
}

/// Largest amount a fee tier may hold (7 digits, 2 decimal places)
pub const MAX_AMOUNT: f64 = 99_999.99;

/// Fee amount: finite, non-negative, at most [`MAX_AMOUNT`]
pub(crate) fn check_amount(errors: &mut ValidationError, field: &'static str, value: f64) {
    if !value.is_finite() {
        errors.push(field, "Amount must be a finite number");
    } else if value < 0.0 {
        errors.push(field, format!("Amount must be non-negative (got {})", value));
    } else if value > MAX_AMOUNT {
        errors.push(
            field,
            format!("Amount must be at most {} (got {})", MAX_AMOUNT, value),
        );
    }
}
