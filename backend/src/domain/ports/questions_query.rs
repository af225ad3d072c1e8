//! Driving port for question bank reads.
use async_trait::async_trait;

use crate::domain::{AssignmentId, Error, Question, QuestionId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestionsQuery: Send + Sync {
    async fn get_question(&self, id: &QuestionId) -> Result<Question, Error>;

    /// List an assignment's questions. Fails with `not_found` for an unknown
    /// assignment.
    async fn list_for_assignment(&self, assignment_id: &AssignmentId)
    -> Result<Vec<Question>, Error>;
}
