//! Port abstraction for the assignment catalog.
use async_trait::async_trait;

use crate::domain::{Assignment, AssignmentId, UserId};

use super::PersistenceError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AssignmentRepository: Send + Sync {
    async fn insert(&self, assignment: &Assignment) -> Result<(), PersistenceError>;

    async fn find_by_id(&self, id: &AssignmentId)
    -> Result<Option<Assignment>, PersistenceError>;

    async fn list(&self) -> Result<Vec<Assignment>, PersistenceError>;

    async fn list_by_teacher(
        &self,
        teacher_id: &UserId,
    ) -> Result<Vec<Assignment>, PersistenceError>;

    async fn update(&self, assignment: &Assignment) -> Result<bool, PersistenceError>;

    /// Delete the assignment. Questions, answers and links cascade.
    async fn delete(&self, id: &AssignmentId) -> Result<bool, PersistenceError>;
}
