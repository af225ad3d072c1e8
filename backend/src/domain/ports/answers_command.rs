//! Driving port for the submission write-path.
use async_trait::async_trait;

use crate::domain::{ChosenAnswer, Error, QuestionId, StudentAnswer, StudentId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnswersCommand: Send + Sync {
    /// Grade and record one submission. Resubmissions add new rows.
    async fn submit_answer(
        &self,
        student_id: StudentId,
        question_id: QuestionId,
        chosen: ChosenAnswer,
    ) -> Result<StudentAnswer, Error>;
}
