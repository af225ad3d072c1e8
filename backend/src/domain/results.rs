//! Result aggregation over the answer ledger.
//!
//! Rows are grouped by student. Groups appear in the order of each student's
//! first row and rows keep their input order, so callers must pass rows sorted
//! by submission time.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use super::{QuestionId, StudentId};

/// A ledger row joined with the question text and student name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRow {
    pub student_id: StudentId,
    pub student_name: String,
    pub question_id: QuestionId,
    pub question_text: String,
    pub chosen_answer: String,
    pub is_correct: bool,
    pub submitted_at: DateTime<Utc>,
}

/// One answer inside a student's summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub question_id: QuestionId,
    pub question_text: String,
    pub chosen_answer: String,
    pub is_correct: bool,
}

/// Per-student score for one assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentResultSummary {
    pub student_id: StudentId,
    pub student_name: String,
    pub answers: Vec<AnswerOutcome>,
    /// Number of correct rows.
    pub total_score: usize,
    /// Number of rows, including repeated submissions.
    pub total_questions: usize,
}

impl StudentResultSummary {
    /// A summary with no answers.
    #[must_use]
    pub fn empty(student_id: StudentId, student_name: impl Into<String>) -> Self {
        Self {
            student_id,
            student_name: student_name.into(),
            answers: Vec::new(),
            total_score: 0,
            total_questions: 0,
        }
    }

    fn push(&mut self, row: ResultRow) {
        if row.is_correct {
            self.total_score += 1;
        }
        self.total_questions += 1;
        self.answers.push(AnswerOutcome {
            question_id: row.question_id,
            question_text: row.question_text,
            chosen_answer: row.chosen_answer,
            is_correct: row.is_correct,
        });
    }
}

/// Group ledger rows into per-student summaries.
///
/// # Examples
/// ```
/// use learners_backend::domain::{aggregate_results, QuestionId, ResultRow, StudentId};
///
/// let student = StudentId::random();
/// let row = |text: &str, ok: bool| ResultRow {
///     student_id: student,
///     student_name: "Sam".into(),
///     question_id: QuestionId::random(),
///     question_text: text.into(),
///     chosen_answer: "x".into(),
///     is_correct: ok,
///     submitted_at: chrono::Utc::now(),
/// };
/// let summaries = aggregate_results(vec![row("Q1", true), row("Q2", false)]);
/// assert_eq!(summaries.len(), 1);
/// assert_eq!(summaries[0].total_score, 1);
/// assert_eq!(summaries[0].total_questions, 2);
/// ```
#[must_use]
pub fn aggregate_results(rows: impl IntoIterator<Item = ResultRow>) -> Vec<StudentResultSummary> {
    let mut summaries: Vec<StudentResultSummary> = Vec::new();
    let mut index: HashMap<StudentId, usize> = HashMap::new();

    for row in rows {
        let position = *index.entry(row.student_id).or_insert_with(|| {
            summaries.push(StudentResultSummary::empty(
                row.student_id,
                row.student_name.clone(),
            ));
            summaries.len() - 1
        });
        if let Some(summary) = summaries.get_mut(position) {
            summary.push(row);
        }
    }

    summaries
}
