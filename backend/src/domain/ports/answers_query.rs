//! Driving port for ledger reads and result summaries.
use async_trait::async_trait;

use crate::domain::{AnswerId, AssignmentId, Error, StudentAnswer, StudentId, StudentResultSummary};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnswersQuery: Send + Sync {
    async fn get_answer(&self, id: &AnswerId) -> Result<StudentAnswer, Error>;

    async fn list_for_student(&self, student_id: &StudentId) -> Result<Vec<StudentAnswer>, Error>;

    /// Per-student summaries ordered by each student's first submission.
    async fn results_for_assignment(
        &self,
        assignment_id: &AssignmentId,
    ) -> Result<Vec<StudentResultSummary>, Error>;

    /// One student's summary. Zero totals when the student has no rows.
    async fn results_for_student(
        &self,
        student_id: &StudentId,
        assignment_id: &AssignmentId,
    ) -> Result<StudentResultSummary, Error>;
}
