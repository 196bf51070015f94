//! Field validation for incoming requests.
//!
//! Every create/patch input declares its rules up front; all violated
//! rules are reported together, in declaration order, as one
//! [`DomainError::Validation`].

use serde::Serialize;
use url::Url;

use crate::domain::error::DomainError;

/// A single failed rule, scoped to the field it applies to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: &'static str,
    pub error: String,
}

impl FieldViolation {
    pub fn new(field: &'static str, error: impl Into<String>) -> Self {
        Self {
            field,
            error: error.into(),
        }
    }
}

/// Collects violations in rule declaration order.
#[derive(Debug, Default)]
pub struct Violations(Vec<FieldViolation>);

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &'static str, error: impl Into<String>) {
        self.0.push(FieldViolation::new(field, error));
    }

    /// Turns the collected violations into an error, or `Ok` when all
    /// rules passed.
    pub fn finish(self) -> Result<(), DomainError> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(DomainError::validation(self.0))
        }
    }
}

pub(crate) const MSG_BLANK: &str = "cannot be blank";

/// Required rule for textual fields: absent or empty is a violation.
pub(crate) fn required_text(v: &mut Violations, field: &'static str, value: Option<&str>) {
    match value {
        None => v.add(field, MSG_BLANK),
        Some(s) if s.is_empty() => v.add(field, MSG_BLANK),
        Some(_) => {}
    }
}

/// Required rule for any optional field.
pub(crate) fn required<T>(v: &mut Violations, field: &'static str, value: Option<&T>) {
    if value.is_none() {
        v.add(field, MSG_BLANK);
    }
}

/// Required rule for integer references: absent and zero both fail.
pub(crate) fn required_id(v: &mut Violations, field: &'static str, value: Option<i32>) {
    match value {
        None | Some(0) => v.add(field, MSG_BLANK),
        Some(_) => {}
    }
}

/// Length rule for present textual fields.
pub(crate) fn length(
    v: &mut Violations,
    field: &'static str,
    value: Option<&str>,
    min: usize,
    max: usize,
) {
    if let Some(s) = value {
        if !s.is_empty() && (s.chars().count() < min || s.chars().count() > max) {
            v.add(
                field,
                format!("the length must be between {min} and {max}"),
            );
        }
    }
}

/// Numeric range rule for present integer fields.
pub(crate) fn range(v: &mut Violations, field: &'static str, value: Option<i32>, min: i32, max: i32) {
    if let Some(n) = value {
        if n < min {
            v.add(field, format!("must be no less than {min}"));
        } else if n > max {
            v.add(field, format!("must be no greater than {max}"));
        }
    }
}

/// URL syntax rule for present textual fields.
pub(crate) fn valid_url(v: &mut Violations, field: &'static str, value: Option<&str>) {
    if let Some(s) = value {
        if !s.is_empty() && Url::parse(s).is_err() {
            v.add(field, "must be a valid URL");
        }
    }
}
