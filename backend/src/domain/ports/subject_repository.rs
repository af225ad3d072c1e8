//! Port abstraction for subject persistence.
use async_trait::async_trait;

use crate::domain::{FirebaseUid, Subject, SubjectId};

use super::PersistenceError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubjectRepository: Send + Sync {
    async fn insert(&self, subject: &Subject) -> Result<(), PersistenceError>;

    async fn find_by_id(&self, id: &SubjectId) -> Result<Option<Subject>, PersistenceError>;

    /// List subjects owned by `teacher_uid`, oldest first.
    async fn list_by_teacher(
        &self,
        teacher_uid: &FirebaseUid,
    ) -> Result<Vec<Subject>, PersistenceError>;

    /// Replace the editable fields. Returns `false` when no row matched.
    async fn update(&self, subject: &Subject) -> Result<bool, PersistenceError>;

    async fn delete(&self, id: &SubjectId) -> Result<bool, PersistenceError>;
}
