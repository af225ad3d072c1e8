//! Port abstraction for student-to-assignment links.
use async_trait::async_trait;

use crate::domain::{AssignmentId, Progress, StudentAssignment, StudentAssignmentId, StudentId};

use super::PersistenceError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentAssignmentRepository: Send + Sync {
    async fn insert(&self, link: &StudentAssignment) -> Result<(), PersistenceError>;

    async fn find_by_id(
        &self,
        id: &StudentAssignmentId,
    ) -> Result<Option<StudentAssignment>, PersistenceError>;

    /// Fetch the link for a (student, assignment) pair, if one exists.
    async fn find_by_pair(
        &self,
        student_id: &StudentId,
        assignment_id: &AssignmentId,
    ) -> Result<Option<StudentAssignment>, PersistenceError>;

    async fn list_by_student(
        &self,
        student_id: &StudentId,
    ) -> Result<Vec<StudentAssignment>, PersistenceError>;

    /// Store new progress. Returns `false` when no row matched.
    async fn update_progress(
        &self,
        id: &StudentAssignmentId,
        progress: &Progress,
    ) -> Result<bool, PersistenceError>;

    async fn delete(&self, id: &StudentAssignmentId) -> Result<bool, PersistenceError>;
}
