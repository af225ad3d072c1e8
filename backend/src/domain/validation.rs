//! Field-level validation shared by the aggregate constructors.

use serde_json::json;

use super::Error;

/// Why a field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldErrorKind {
    /// The value was empty once trimmed.
    Empty,
    /// The value is longer than allowed.
    TooLong,
    /// The value is shorter than allowed.
    TooShort,
    /// The value does not match the expected format.
    InvalidFormat,
    /// The value is outside the accepted range.
    OutOfRange,
}

impl FieldErrorKind {
    /// Stable code reported to clients in error details.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::TooLong => "too_long",
            Self::TooShort => "too_short",
            Self::InvalidFormat => "invalid_format",
            Self::OutOfRange => "out_of_range",
        }
    }
}

/// A single rejected field, named as clients see it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {message}")]
pub struct FieldError {
    /// Client-facing field name.
    pub field: &'static str,
    /// Rejection category.
    pub kind: FieldErrorKind,
    /// Human-readable explanation.
    pub message: String,
}

impl FieldError {
    /// Build a field error.
    pub fn new(field: &'static str, kind: FieldErrorKind, message: impl Into<String>) -> Self {
        Self {
            field,
            kind,
            message: message.into(),
        }
    }

    /// Shorthand for a field that must not be blank.
    #[must_use]
    pub fn empty(field: &'static str) -> Self {
        Self::new(field, FieldErrorKind::Empty, format!("{field} must not be empty"))
    }
}

impl From<FieldError> for Error {
    fn from(value: FieldError) -> Self {
        Self::invalid_request(value.message).with_details(json!({
            "field": value.field,
            "code": value.kind.as_str(),
        }))
    }
}

/// Trim `value` and reject it when nothing remains.
pub fn required_text(field: &'static str, value: &str) -> Result<String, FieldError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(FieldError::empty(field));
    }
    Ok(trimmed.to_owned())
}

/// Trim an optional value, collapsing blank input to `None`.
#[must_use]
pub fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|trimmed| !trimmed.is_empty())
        .map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case("  Ada  ", "Ada")]
    #[case("x", "x")]
    fn required_text_trims(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(required_text("fullName", raw).expect("valid"), expected);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\t\n")]
    fn required_text_rejects_blank(#[case] raw: &str) {
        let err = required_text("regNum", raw).expect_err("blank");
        assert_eq!(err.field, "regNum");
        assert_eq!(err.kind, FieldErrorKind::Empty);
    }

    #[test]
    fn optional_text_collapses_blank_to_none() {
        assert_eq!(optional_text(Some("  ")), None);
        assert_eq!(optional_text(None), None);
        assert_eq!(optional_text(Some(" Mum ")), Some("Mum".to_owned()));
    }

    #[test]
    fn converts_into_invalid_request_with_details() {
        let error: Error = FieldError::empty("title").into();
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        let details = error.details().expect("details");
        assert_eq!(details["field"], "title");
        assert_eq!(details["code"], "empty");
    }
}
