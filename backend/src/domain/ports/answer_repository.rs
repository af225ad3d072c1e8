//! Port abstraction for the append-only answer ledger.
//!
//! The ledger exposes no update or delete: rows are written once.

use async_trait::async_trait;

use crate::domain::{AnswerId, AssignmentId, ResultRow, StudentAnswer, StudentId};

use super::PersistenceError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnswerRepository: Send + Sync {
    async fn insert(&self, answer: &StudentAnswer) -> Result<(), PersistenceError>;

    async fn find_by_id(&self, id: &AnswerId) -> Result<Option<StudentAnswer>, PersistenceError>;

    /// A student's submissions ordered by `submitted_at`, then id.
    async fn list_by_student(
        &self,
        student_id: &StudentId,
    ) -> Result<Vec<StudentAnswer>, PersistenceError>;

    /// Ledger rows for every question of `assignment_id`, joined with the
    /// question text and student name, ordered by `submitted_at` then id.
    ///
    /// When `student_id` is set only that student's rows are returned.
    async fn result_rows(
        &self,
        assignment_id: &AssignmentId,
        student_id: Option<StudentId>,
    ) -> Result<Vec<ResultRow>, PersistenceError>;
}
