//! Answer ledger model.
//!
//! Each submission becomes one immutable ledger row. Correctness is decided
//! once, at insert time, and is never recomputed.

use chrono::{DateTime, Utc};

use super::validation::FieldError;
use super::{AnswerId, Question, QuestionId, StudentId};

/// The answer text a student chose. Stored and compared verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChosenAnswer(String);

impl ChosenAnswer {
    /// Reject blank submissions without altering the text.
    pub fn new(raw: impl Into<String>) -> Result<Self, FieldError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(FieldError::empty("chosenAnswer"));
        }
        Ok(Self(raw))
    }

    /// Borrow the answer text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Take ownership of the answer text.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

/// One graded submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentAnswer {
    pub id: AnswerId,
    pub student_id: StudentId,
    pub question_id: QuestionId,
    pub chosen_answer: String,
    pub is_correct: bool,
    pub submitted_at: DateTime<Utc>,
}

impl StudentAnswer {
    /// Grade `chosen` against `question` and build the ledger row.
    #[must_use]
    pub fn grade(
        student_id: StudentId,
        question: &Question,
        chosen: ChosenAnswer,
        submitted_at: DateTime<Utc>,
    ) -> Self {
        let is_correct = question.is_correct(chosen.as_str());
        Self {
            id: AnswerId::random(),
            student_id,
            question_id: question.id,
            chosen_answer: chosen.into_inner(),
            is_correct,
            submitted_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AssignmentId, QuestionDetails};
    use chrono::TimeZone;
    use rstest::rstest;

    fn question(correct: &str) -> Question {
        Question {
            id: QuestionId::random(),
            details: QuestionDetails::new(
                AssignmentId::random(),
                "2 + 2?",
                &["4".to_owned(), "5".to_owned()],
                correct,
            )
            .expect("valid question"),
        }
    }

    #[rstest]
    #[case("4", true)]
    #[case("5", false)]
    #[case(" 4", false)]
    fn grade_fixes_correctness_at_insert(#[case] chosen: &str, #[case] expected: bool) {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).single().expect("timestamp");
        let q = question("4");
        let row = StudentAnswer::grade(
            StudentId::random(),
            &q,
            ChosenAnswer::new(chosen).expect("non-blank"),
            at,
        );
        assert_eq!(row.is_correct, expected);
        assert_eq!(row.chosen_answer, chosen);
        assert_eq!(row.question_id, q.id);
        assert_eq!(row.submitted_at, at);
    }

    #[test]
    fn chosen_answer_rejects_blank_text() {
        let err = ChosenAnswer::new("  ").expect_err("blank");
        assert_eq!(err.field, "chosenAnswer");
    }
}
