//! Driving port for question bank writes.
use async_trait::async_trait;

use crate::domain::{Error, Question, QuestionDetails, QuestionId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestionsCommand: Send + Sync {
    /// Create a question under an existing assignment.
    async fn create_question(&self, details: QuestionDetails) -> Result<Question, Error>;

    async fn update_question(
        &self,
        id: &QuestionId,
        details: QuestionDetails,
    ) -> Result<Question, Error>;

    async fn delete_question(&self, id: &QuestionId) -> Result<(), Error>;
}
