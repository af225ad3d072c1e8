//! Driving port for assignment catalog writes.
use async_trait::async_trait;

use crate::domain::{Assignment, AssignmentDetails, AssignmentId, Error};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AssignmentsCommand: Send + Sync {
    /// Create an assignment. The teacher must exist.
    async fn create_assignment(&self, details: AssignmentDetails) -> Result<Assignment, Error>;

    async fn update_assignment(
        &self,
        id: &AssignmentId,
        details: AssignmentDetails,
    ) -> Result<Assignment, Error>;

    async fn delete_assignment(&self, id: &AssignmentId) -> Result<(), Error>;
}
