//! Question bank service.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{
    AssignmentRepository, QuestionRepository, QuestionsCommand, QuestionsQuery,
};
use crate::domain::{AssignmentId, Error, Question, QuestionDetails, QuestionId};

use super::persistence_error_mapping::map_persistence_error;

/// Implements [`QuestionsQuery`] and [`QuestionsCommand`].
#[derive(Clone)]
pub struct QuestionsService<Q, A> {
    questions: Arc<Q>,
    assignments: Arc<A>,
}

impl<Q, A> QuestionsService<Q, A> {
    pub fn new(questions: Arc<Q>, assignments: Arc<A>) -> Self {
        Self {
            questions,
            assignments,
        }
    }
}

impl<Q, A> QuestionsService<Q, A>
where
    Q: QuestionRepository,
    A: AssignmentRepository,
{
    async fn ensure_assignment_exists(&self, id: &AssignmentId) -> Result<(), Error> {
        self.assignments
            .find_by_id(id)
            .await
            .map_err(map_persistence_error("assignment"))?
            .map(|_| ())
            .ok_or_else(|| Error::not_found(format!("assignment {id} not found")))
    }
}

#[async_trait]
impl<Q, A> QuestionsQuery for QuestionsService<Q, A>
where
    Q: QuestionRepository,
    A: AssignmentRepository,
{
    async fn get_question(&self, id: &QuestionId) -> Result<Question, Error> {
        self.questions
            .find_by_id(id)
            .await
            .map_err(map_persistence_error("question"))?
            .ok_or_else(|| Error::not_found(format!("question {id} not found")))
    }

    async fn list_for_assignment(
        &self,
        assignment_id: &AssignmentId,
    ) -> Result<Vec<Question>, Error> {
        self.ensure_assignment_exists(assignment_id).await?;
        self.questions
            .list_by_assignment(assignment_id)
            .await
            .map_err(map_persistence_error("question"))
    }
}

#[async_trait]
impl<Q, A> QuestionsCommand for QuestionsService<Q, A>
where
    Q: QuestionRepository,
    A: AssignmentRepository,
{
    async fn create_question(&self, details: QuestionDetails) -> Result<Question, Error> {
        self.ensure_assignment_exists(&details.assignment_id).await?;
        let question = Question {
            id: QuestionId::random(),
            details,
        };
        self.questions
            .insert(&question)
            .await
            .map_err(map_persistence_error("question"))?;
        Ok(question)
    }

    async fn update_question(
        &self,
        id: &QuestionId,
        details: QuestionDetails,
    ) -> Result<Question, Error> {
        self.ensure_assignment_exists(&details.assignment_id).await?;
        let question = Question { id: *id, details };
        let updated = self
            .questions
            .update(&question)
            .await
            .map_err(map_persistence_error("question"))?;
        if !updated {
            return Err(Error::not_found(format!("question {id} not found")));
        }
        Ok(question)
    }

    async fn delete_question(&self, id: &QuestionId) -> Result<(), Error> {
        let deleted = self
            .questions
            .delete(id)
            .await
            .map_err(map_persistence_error("question"))?;
        if deleted {
            Ok(())
        } else {
            Err(Error::not_found(format!("question {id} not found")))
        }
    }
}
