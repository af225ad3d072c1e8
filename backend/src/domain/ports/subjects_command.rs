//! Driving port for subject writes.
//!
//! Every mutation takes the authenticated [`Caller`]; ownership is decided
//! from its verified Firebase UID.

use async_trait::async_trait;

use crate::domain::{Caller, Error, Subject, SubjectDetails, SubjectId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubjectsCommand: Send + Sync {
    /// Create a subject owned by `caller`.
    async fn create_subject(
        &self,
        caller: &Caller,
        details: SubjectDetails,
    ) -> Result<Subject, Error>;

    /// Replace a subject's fields. Fails with `forbidden` for non-owners.
    async fn update_subject(
        &self,
        caller: &Caller,
        id: &SubjectId,
        details: SubjectDetails,
    ) -> Result<Subject, Error>;

    /// Delete a subject. Fails with `forbidden` for non-owners.
    async fn delete_subject(&self, caller: &Caller, id: &SubjectId) -> Result<(), Error>;
}
