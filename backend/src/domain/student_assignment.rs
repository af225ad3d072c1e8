//! Links between students and the assignments issued to them.

use std::fmt;
use std::str::FromStr;

use super::validation::{FieldError, FieldErrorKind};
use super::{AssignmentId, StudentAssignmentId, StudentId};

/// Highest accepted grade.
pub const GRADE_MAX: i32 = 100;

/// Progress of a student through an assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CompletionStatus {
    /// Assigned, not yet completed.
    #[default]
    Pending,
    /// Completed by the student.
    Completed,
    /// Completed and graded by the teacher.
    Graded,
}

impl CompletionStatus {
    /// Canonical upper-case name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Completed => "COMPLETED",
            Self::Graded => "GRADED",
        }
    }
}

impl fmt::Display for CompletionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CompletionStatus {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PENDING" => Ok(Self::Pending),
            "COMPLETED" => Ok(Self::Completed),
            "GRADED" => Ok(Self::Graded),
            _ => Err(FieldError::new(
                "completionStatus",
                FieldErrorKind::InvalidFormat,
                "completionStatus must be PENDING, COMPLETED or GRADED",
            )),
        }
    }
}

/// Validated progress update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub completion_status: CompletionStatus,
    pub grade: Option<i32>,
}

impl Progress {
    /// Validate a grade in `0..=GRADE_MAX`.
    pub fn new(completion_status: CompletionStatus, grade: Option<i32>) -> Result<Self, FieldError> {
        if let Some(value) = grade
            && !(0..=GRADE_MAX).contains(&value)
        {
            return Err(FieldError::new(
                "grade",
                FieldErrorKind::OutOfRange,
                format!("grade must be between 0 and {GRADE_MAX}"),
            ));
        }
        Ok(Self {
            completion_status,
            grade,
        })
    }
}

/// One student's link to one assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentAssignment {
    pub id: StudentAssignmentId,
    pub student_id: StudentId,
    pub assignment_id: AssignmentId,
    pub progress: Progress,
}

impl StudentAssignment {
    /// A freshly assigned, pending link.
    #[must_use]
    pub fn assign(student_id: StudentId, assignment_id: AssignmentId) -> Self {
        Self {
            id: StudentAssignmentId::random(),
            student_id,
            assignment_id,
            progress: Progress {
                completion_status: CompletionStatus::Pending,
                grade: None,
            },
        }
    }
}
