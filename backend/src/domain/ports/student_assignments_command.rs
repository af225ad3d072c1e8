//! Driving port for student-assignment writes.
use async_trait::async_trait;

use crate::domain::{
    AssignmentId, Error, Progress, StudentAssignment, StudentAssignmentId, StudentId,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentAssignmentsCommand: Send + Sync {
    /// Link a student to an assignment. Fails with `conflict` when the pair
    /// is already linked.
    async fn assign(
        &self,
        student_id: StudentId,
        assignment_id: AssignmentId,
    ) -> Result<StudentAssignment, Error>;

    async fn update_progress(
        &self,
        id: &StudentAssignmentId,
        progress: Progress,
    ) -> Result<StudentAssignment, Error>;

    async fn unassign(&self, id: &StudentAssignmentId) -> Result<(), Error>;
}
