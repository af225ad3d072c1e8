//! Assignment catalog service.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{
    AssignmentRepository, AssignmentsCommand, AssignmentsQuery, UserRepository,
};
use crate::domain::{Assignment, AssignmentDetails, AssignmentId, Error, UserId};

use super::persistence_error_mapping::map_persistence_error;

/// Implements [`AssignmentsQuery`] and [`AssignmentsCommand`].
#[derive(Clone)]
pub struct AssignmentsService<A, U> {
    assignments: Arc<A>,
    users: Arc<U>,
}

impl<A, U> AssignmentsService<A, U> {
    pub fn new(assignments: Arc<A>, users: Arc<U>) -> Self {
        Self { assignments, users }
    }
}

impl<A, U> AssignmentsService<A, U>
where
    A: AssignmentRepository,
    U: UserRepository,
{
    async fn ensure_teacher_exists(&self, teacher_id: &UserId) -> Result<(), Error> {
        self.users
            .find_by_id(teacher_id)
            .await
            .map_err(map_persistence_error("user"))?
            .map(|_| ())
            .ok_or_else(|| Error::not_found(format!("teacher {teacher_id} not found")))
    }
}

#[async_trait]
impl<A, U> AssignmentsQuery for AssignmentsService<A, U>
where
    A: AssignmentRepository,
    U: UserRepository,
{
    async fn get_assignment(&self, id: &AssignmentId) -> Result<Assignment, Error> {
        self.assignments
            .find_by_id(id)
            .await
            .map_err(map_persistence_error("assignment"))?
            .ok_or_else(|| Error::not_found(format!("assignment {id} not found")))
    }

    async fn list_assignments(
        &self,
        teacher_id: Option<UserId>,
    ) -> Result<Vec<Assignment>, Error> {
        let listed = match teacher_id {
            Some(teacher_id) => self.assignments.list_by_teacher(&teacher_id).await,
            None => self.assignments.list().await,
        };
        listed.map_err(map_persistence_error("assignment"))
    }
}

#[async_trait]
impl<A, U> AssignmentsCommand for AssignmentsService<A, U>
where
    A: AssignmentRepository,
    U: UserRepository,
{
    async fn create_assignment(&self, details: AssignmentDetails) -> Result<Assignment, Error> {
        self.ensure_teacher_exists(&details.teacher_id).await?;
        let assignment = Assignment {
            id: AssignmentId::random(),
            details,
        };
        self.assignments
            .insert(&assignment)
            .await
            .map_err(map_persistence_error("assignment"))?;
        Ok(assignment)
    }

    async fn update_assignment(
        &self,
        id: &AssignmentId,
        details: AssignmentDetails,
    ) -> Result<Assignment, Error> {
        self.ensure_teacher_exists(&details.teacher_id).await?;
        let assignment = Assignment { id: *id, details };
        let updated = self
            .assignments
            .update(&assignment)
            .await
            .map_err(map_persistence_error("assignment"))?;
        if !updated {
            return Err(Error::not_found(format!("assignment {id} not found")));
        }
        Ok(assignment)
    }

    async fn delete_assignment(&self, id: &AssignmentId) -> Result<(), Error> {
        let deleted = self
            .assignments
            .delete(id)
            .await
            .map_err(map_persistence_error("assignment"))?;
        if deleted {
            Ok(())
        } else {
            Err(Error::not_found(format!("assignment {id} not found")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::{MockAssignmentRepository, MockUserRepository};
    use crate::test_support::sample_teacher;
    use chrono::NaiveDate;

    fn details(teacher_id: UserId) -> AssignmentDetails {
        AssignmentDetails::new(
            "Fractions",
            Some("Worksheet 3"),
            NaiveDate::from_ymd_opt(2024, 5, 1),
            teacher_id,
        )
        .expect("details")
    }

    #[tokio::test]
    async fn create_requires_an_existing_teacher() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_id().return_once(|_| Ok(None));
        let mut assignments = MockAssignmentRepository::new();
        assignments.expect_insert().never();

        let err = AssignmentsService::new(Arc::new(assignments), Arc::new(users))
            .create_assignment(details(UserId::random()))
            .await
            .expect_err("missing teacher");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn update_of_missing_assignment_is_not_found() {
        let teacher = sample_teacher("mrs.k");
        let teacher_id = teacher.id;
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .return_once(move |_| Ok(Some(teacher)));
        let mut assignments = MockAssignmentRepository::new();
        assignments.expect_update().return_once(|_| Ok(false));

        let err = AssignmentsService::new(Arc::new(assignments), Arc::new(users))
            .update_assignment(&AssignmentId::random(), details(teacher_id))
            .await
            .expect_err("missing");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn list_without_filter_returns_everything() {
        let mut assignments = MockAssignmentRepository::new();
        assignments.expect_list().times(1).return_once(|| Ok(Vec::new()));
        assignments.expect_list_by_teacher().never();

        let listed = AssignmentsService::new(Arc::new(assignments), Arc::new(MockUserRepository::new()))
            .list_assignments(None)
            .await
            .expect("listed");
        assert!(listed.is_empty());
    }
}
