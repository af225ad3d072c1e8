//! Driving port for student-assignment reads.
use async_trait::async_trait;

use crate::domain::{Error, StudentAssignment, StudentAssignmentId, StudentId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentAssignmentsQuery: Send + Sync {
    async fn get_link(&self, id: &StudentAssignmentId) -> Result<StudentAssignment, Error>;

    async fn list_for_student(
        &self,
        student_id: &StudentId,
    ) -> Result<Vec<StudentAssignment>, Error>;
}
