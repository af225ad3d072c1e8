//! Question bank model.

use super::validation::{FieldError, FieldErrorKind, required_text};
use super::{AssignmentId, QuestionId};

/// Validated question content.
///
/// Options keep their order and may contain any characters. The correct
/// answer is not required to be one of the options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionDetails {
    pub assignment_id: AssignmentId,
    pub question_text: String,
    pub options: Vec<String>,
    pub correct_answer: String,
}

impl QuestionDetails {
    /// Validate raw question fields.
    pub fn new(
        assignment_id: AssignmentId,
        question_text: &str,
        options: &[String],
        correct_answer: &str,
    ) -> Result<Self, FieldError> {
        if options.is_empty() {
            return Err(FieldError::new(
                "options",
                FieldErrorKind::Empty,
                "options must contain at least one entry",
            ));
        }
        let options = options
            .iter()
            .map(|option| {
                let trimmed = option.trim();
                if trimmed.is_empty() {
                    Err(FieldError::new(
                        "options",
                        FieldErrorKind::Empty,
                        "options must not contain blank entries",
                    ))
                } else {
                    Ok(trimmed.to_owned())
                }
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            assignment_id,
            question_text: required_text("questionText", question_text)?,
            options,
            correct_answer: required_text("correctAnswer", correct_answer)?,
        })
    }
}

/// A multiple-choice question belonging to one assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub id: QuestionId,
    pub details: QuestionDetails,
}

impl Question {
    /// Grade a submission by exact string equality with the correct answer.
    #[must_use]
    pub fn is_correct(&self, chosen: &str) -> bool {
        chosen == self.details.correct_answer
    }
}
