//! Port abstraction for the student directory.
//!
//! A student owns exactly one login account, so creation and deletion touch
//! two tables. Adapters must perform both writes in one transaction.

use async_trait::async_trait;

use crate::domain::{Student, StudentId, User, UserId};

use super::PersistenceError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentRepository: Send + Sync {
    /// Insert `account` and `student` atomically.
    async fn create_with_account(
        &self,
        student: &Student,
        account: &User,
    ) -> Result<(), PersistenceError>;

    async fn find_by_id(&self, id: &StudentId) -> Result<Option<Student>, PersistenceError>;

    /// Fetch the student that owns `user_id`, if any.
    async fn find_by_user_id(&self, user_id: &UserId)
    -> Result<Option<Student>, PersistenceError>;

    async fn list(&self) -> Result<Vec<Student>, PersistenceError>;

    async fn list_by_teacher(&self, teacher_id: &UserId)
    -> Result<Vec<Student>, PersistenceError>;

    /// Replace the profile fields. Returns `false` when no row matched.
    async fn update(&self, student: &Student) -> Result<bool, PersistenceError>;

    /// Delete the student and its owned account atomically.
    ///
    /// Returns `false` when no student matched.
    async fn delete_with_account(&self, id: &StudentId) -> Result<bool, PersistenceError>;
}
