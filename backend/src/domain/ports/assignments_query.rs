//! Driving port for assignment catalog reads.
use async_trait::async_trait;

use crate::domain::{Assignment, AssignmentId, Error, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AssignmentsQuery: Send + Sync {
    async fn get_assignment(&self, id: &AssignmentId) -> Result<Assignment, Error>;

    /// List every assignment, or only those of `teacher_id` when set.
    async fn list_assignments(&self, teacher_id: Option<UserId>)
    -> Result<Vec<Assignment>, Error>;
}
