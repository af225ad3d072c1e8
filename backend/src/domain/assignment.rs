//! Assignment catalog model.

use chrono::NaiveDate;

use super::validation::{FieldError, optional_text, required_text};
use super::{AssignmentId, UserId};

/// Validated assignment fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentDetails {
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub teacher_id: UserId,
}

impl AssignmentDetails {
    /// Validate raw assignment fields.
    pub fn new(
        title: &str,
        description: Option<&str>,
        due_date: Option<NaiveDate>,
        teacher_id: UserId,
    ) -> Result<Self, FieldError> {
        Ok(Self {
            title: required_text("title", title)?,
            description: optional_text(description),
            due_date,
            teacher_id,
        })
    }
}

/// A set of questions issued by a teacher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub id: AssignmentId,
    pub details: AssignmentDetails,
}
