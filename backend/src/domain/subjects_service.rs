//! Subject registry service.
//!
//! Ownership is keyed on the caller's verified Firebase UID. A teacher can
//! only modify subjects carrying their own UID.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::domain::ports::{SubjectRepository, SubjectsCommand, SubjectsQuery};
use crate::domain::{Caller, Error, Subject, SubjectDetails, SubjectId};

use super::persistence_error_mapping::map_persistence_error;

/// Implements [`SubjectsQuery`] and [`SubjectsCommand`].
#[derive(Clone)]
pub struct SubjectsService<R> {
    subjects: Arc<R>,
}

impl<R> SubjectsService<R> {
    pub fn new(subjects: Arc<R>) -> Self {
        Self { subjects }
    }
}

impl<R: SubjectRepository> SubjectsService<R> {
    async fn require_owned(&self, caller: &Caller, id: &SubjectId) -> Result<Subject, Error> {
        let subject = self
            .subjects
            .find_by_id(id)
            .await
            .map_err(map_persistence_error("subject"))?
            .ok_or_else(|| Error::not_found(format!("subject {id} not found")))?;
        if !subject.is_owned_by(&caller.firebase_uid) {
            warn!(subject_id = %id, user_id = %caller.user_id, "subject ownership check failed");
            return Err(Error::forbidden("subject belongs to another teacher"));
        }
        Ok(subject)
    }
}

#[async_trait]
impl<R: SubjectRepository> SubjectsQuery for SubjectsService<R> {
    async fn get_subject(&self, id: &SubjectId) -> Result<Subject, Error> {
        self.subjects
            .find_by_id(id)
            .await
            .map_err(map_persistence_error("subject"))?
            .ok_or_else(|| Error::not_found(format!("subject {id} not found")))
    }

    async fn list_subjects(&self, caller: &Caller) -> Result<Vec<Subject>, Error> {
        self.subjects
            .list_by_teacher(&caller.firebase_uid)
            .await
            .map_err(map_persistence_error("subject"))
    }
}

#[async_trait]
impl<R: SubjectRepository> SubjectsCommand for SubjectsService<R> {
    async fn create_subject(
        &self,
        caller: &Caller,
        details: SubjectDetails,
    ) -> Result<Subject, Error> {
        let subject = Subject {
            id: SubjectId::random(),
            details,
            teacher_uid: caller.firebase_uid.clone(),
        };
        self.subjects
            .insert(&subject)
            .await
            .map_err(map_persistence_error("subject"))?;
        Ok(subject)
    }

    async fn update_subject(
        &self,
        caller: &Caller,
        id: &SubjectId,
        details: SubjectDetails,
    ) -> Result<Subject, Error> {
        let mut subject = self.require_owned(caller, id).await?;
        subject.details = details;
        let updated = self
            .subjects
            .update(&subject)
            .await
            .map_err(map_persistence_error("subject"))?;
        if !updated {
            return Err(Error::not_found(format!("subject {id} not found")));
        }
        Ok(subject)
    }

    async fn delete_subject(&self, caller: &Caller, id: &SubjectId) -> Result<(), Error> {
        self.require_owned(caller, id).await?;
        let deleted = self
            .subjects
            .delete(id)
            .await
            .map_err(map_persistence_error("subject"))?;
        if deleted {
            Ok(())
        } else {
            Err(Error::not_found(format!("subject {id} not found")))
        }
    }
}
