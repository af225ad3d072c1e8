//! Student directory model.

use super::validation::{FieldError, FieldErrorKind, optional_text, required_text};
use super::{EmailAddress, StudentId, UserId, Username};

/// Unvalidated student fields as supplied by a client.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StudentProfileDraft {
    pub full_name: String,
    pub reg_num: String,
    pub grade: String,
    pub gender: String,
    pub is_active: bool,
    pub parent_name: Option<String>,
    pub performance_score: Option<f64>,
}

/// Validated, mutable student fields.
#[derive(Debug, Clone, PartialEq)]
pub struct StudentProfile {
    pub full_name: String,
    pub reg_num: String,
    pub grade: String,
    pub gender: String,
    pub is_active: bool,
    pub parent_name: Option<String>,
    pub performance_score: Option<f64>,
}

impl TryFrom<StudentProfileDraft> for StudentProfile {
    type Error = FieldError;

    fn try_from(draft: StudentProfileDraft) -> Result<Self, Self::Error> {
        let performance_score = match draft.performance_score {
            Some(score) if !score.is_finite() => {
                return Err(FieldError::new(
                    "performanceScore",
                    FieldErrorKind::OutOfRange,
                    "performanceScore must be a finite number",
                ));
            }
            other => other,
        };
        Ok(Self {
            full_name: required_text("fullName", &draft.full_name)?,
            reg_num: required_text("regNum", &draft.reg_num)?,
            grade: required_text("grade", &draft.grade)?,
            gender: required_text("gender", &draft.gender)?,
            is_active: draft.is_active,
            parent_name: optional_text(draft.parent_name.as_deref()),
            performance_score,
        })
    }
}

/// A student record. Owns exactly one login account and belongs to a teacher.
#[derive(Debug, Clone, PartialEq)]
pub struct Student {
    pub id: StudentId,
    pub profile: StudentProfile,
    pub user_id: UserId,
    pub teacher_id: UserId,
}

/// Everything needed to enrol a new student and create their account.
#[derive(Debug, Clone, PartialEq)]
pub struct NewStudent {
    pub profile: StudentProfile,
    pub teacher_id: UserId,
    pub username: Username,
    pub email: EmailAddress,
}
