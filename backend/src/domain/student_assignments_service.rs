//! Student assignment link service.
//!
//! A (student, assignment) pair is linked at most once. The service checks
//! for an existing pair before inserting; the unique index backs that check
//! when two requests race.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{
    AssignmentRepository, StudentAssignmentRepository, StudentAssignmentsCommand,
    StudentAssignmentsQuery, StudentRepository,
};
use crate::domain::{
    AssignmentId, Error, Progress, StudentAssignment, StudentAssignmentId, StudentId,
};

use super::persistence_error_mapping::map_persistence_error;

/// Implements [`StudentAssignmentsQuery`] and [`StudentAssignmentsCommand`].
#[derive(Clone)]
pub struct StudentAssignmentsService<L, S, A> {
    links: Arc<L>,
    students: Arc<S>,
    assignments: Arc<A>,
}

impl<L, S, A> StudentAssignmentsService<L, S, A> {
    pub fn new(links: Arc<L>, students: Arc<S>, assignments: Arc<A>) -> Self {
        Self {
            links,
            students,
            assignments,
        }
    }
}

impl<L, S, A> StudentAssignmentsService<L, S, A>
where
    L: StudentAssignmentRepository,
    S: StudentRepository,
    A: AssignmentRepository,
{
    async fn require_link(&self, id: &StudentAssignmentId) -> Result<StudentAssignment, Error> {
        self.links
            .find_by_id(id)
            .await
            .map_err(map_persistence_error("student assignment"))?
            .ok_or_else(|| Error::not_found(format!("student assignment {id} not found")))
    }
}

#[async_trait]
impl<L, S, A> StudentAssignmentsQuery for StudentAssignmentsService<L, S, A>
where
    L: StudentAssignmentRepository,
    S: StudentRepository,
    A: AssignmentRepository,
{
    async fn get_link(&self, id: &StudentAssignmentId) -> Result<StudentAssignment, Error> {
        self.require_link(id).await
    }

    async fn list_for_student(
        &self,
        student_id: &StudentId,
    ) -> Result<Vec<StudentAssignment>, Error> {
        self.links
            .list_by_student(student_id)
            .await
            .map_err(map_persistence_error("student assignment"))
    }
}

#[async_trait]
impl<L, S, A> StudentAssignmentsCommand for StudentAssignmentsService<L, S, A>
where
    L: StudentAssignmentRepository,
    S: StudentRepository,
    A: AssignmentRepository,
{
    async fn assign(
        &self,
        student_id: StudentId,
        assignment_id: AssignmentId,
    ) -> Result<StudentAssignment, Error> {
        self.students
            .find_by_id(&student_id)
            .await
            .map_err(map_persistence_error("student"))?
            .ok_or_else(|| Error::not_found(format!("student {student_id} not found")))?;
        self.assignments
            .find_by_id(&assignment_id)
            .await
            .map_err(map_persistence_error("assignment"))?
            .ok_or_else(|| Error::not_found(format!("assignment {assignment_id} not found")))?;

        let existing = self
            .links
            .find_by_pair(&student_id, &assignment_id)
            .await
            .map_err(map_persistence_error("student assignment"))?;
        if existing.is_some() {
            return Err(Error::conflict(format!(
                "student {student_id} is already assigned {assignment_id}"
            )));
        }

        let link = StudentAssignment::assign(student_id, assignment_id);
        self.links
            .insert(&link)
            .await
            .map_err(map_persistence_error("student assignment"))?;
        Ok(link)
    }

    async fn update_progress(
        &self,
        id: &StudentAssignmentId,
        progress: Progress,
    ) -> Result<StudentAssignment, Error> {
        let mut link = self.require_link(id).await?;
        let updated = self
            .links
            .update_progress(id, &progress)
            .await
            .map_err(map_persistence_error("student assignment"))?;
        if !updated {
            return Err(Error::not_found(format!("student assignment {id} not found")));
        }
        link.progress = progress;
        Ok(link)
    }

    async fn unassign(&self, id: &StudentAssignmentId) -> Result<(), Error> {
        let deleted = self
            .links
            .delete(id)
            .await
            .map_err(map_persistence_error("student assignment"))?;
        if deleted {
            Ok(())
        } else {
            Err(Error::not_found(format!("student assignment {id} not found")))
        }
    }
}
