//! Port abstraction for the question bank.
use async_trait::async_trait;

use crate::domain::{AssignmentId, Question, QuestionId};

use super::PersistenceError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    async fn insert(&self, question: &Question) -> Result<(), PersistenceError>;

    async fn find_by_id(&self, id: &QuestionId) -> Result<Option<Question>, PersistenceError>;

    /// List an assignment's questions in creation order.
    async fn list_by_assignment(
        &self,
        assignment_id: &AssignmentId,
    ) -> Result<Vec<Question>, PersistenceError>;

    async fn update(&self, question: &Question) -> Result<bool, PersistenceError>;

    async fn delete(&self, id: &QuestionId) -> Result<bool, PersistenceError>;
}
