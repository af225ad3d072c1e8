//! Driving port for student directory writes.
use async_trait::async_trait;

use crate::domain::{Error, NewStudent, Student, StudentId, StudentProfile};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentsCommand: Send + Sync {
    /// Create the student and its STUDENT login account together.
    async fn create_student(&self, request: NewStudent) -> Result<Student, Error>;

    async fn update_student(
        &self,
        id: &StudentId,
        profile: StudentProfile,
    ) -> Result<Student, Error>;

    /// Delete the student and its owned account together.
    async fn delete_student(&self, id: &StudentId) -> Result<(), Error>;
}
