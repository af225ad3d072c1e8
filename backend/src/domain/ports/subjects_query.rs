//! Driving port for subject reads.
use async_trait::async_trait;

use crate::domain::{Caller, Error, Subject, SubjectId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubjectsQuery: Send + Sync {
    async fn get_subject(&self, id: &SubjectId) -> Result<Subject, Error>;

    /// List the subjects owned by `caller`.
    async fn list_subjects(&self, caller: &Caller) -> Result<Vec<Subject>, Error>;
}
