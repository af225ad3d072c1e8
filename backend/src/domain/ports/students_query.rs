//! Driving port for student directory reads.
use async_trait::async_trait;

use crate::domain::{Error, Student, StudentId, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentsQuery: Send + Sync {
    async fn get_student(&self, id: &StudentId) -> Result<Student, Error>;

    /// List every student, or only those of `teacher_id` when set.
    async fn list_students(&self, teacher_id: Option<UserId>) -> Result<Vec<Student>, Error>;
}
