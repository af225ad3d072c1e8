//! Student directory service.
//!
//! Students are created together with a STUDENT login account and deleted
//! together with it. The repository performs both writes atomically; this
//! service validates the owning teacher first.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{StudentRepository, StudentsCommand, StudentsQuery, UserRepository};
use crate::domain::{
    Error, NewStudent, Role, Student, StudentId, StudentProfile, User, UserId,
};

use super::persistence_error_mapping::map_persistence_error;

/// Implements [`StudentsQuery`] and [`StudentsCommand`].
#[derive(Clone)]
pub struct StudentsService<S, U> {
    students: Arc<S>,
    users: Arc<U>,
    clock: Arc<dyn Clock>,
}

impl<S, U> StudentsService<S, U> {
    pub fn new(students: Arc<S>, users: Arc<U>, clock: Arc<dyn Clock>) -> Self {
        Self {
            students,
            users,
            clock,
        }
    }
}

impl<S, U> StudentsService<S, U>
where
    S: StudentRepository,
    U: UserRepository,
{
    async fn require_teacher(&self, teacher_id: &UserId) -> Result<User, Error> {
        let teacher = self
            .users
            .find_by_id(teacher_id)
            .await
            .map_err(map_persistence_error("user"))?
            .ok_or_else(|| Error::not_found(format!("teacher {teacher_id} not found")))?;
        if teacher.role != Role::Teacher {
            return Err(Error::invalid_request(format!(
                "user {teacher_id} is not a teacher"
            )));
        }
        Ok(teacher)
    }

    async fn require_student(&self, id: &StudentId) -> Result<Student, Error> {
        self.students
            .find_by_id(id)
            .await
            .map_err(map_persistence_error("student"))?
            .ok_or_else(|| Error::not_found(format!("student {id} not found")))
    }
}

#[async_trait]
impl<S, U> StudentsQuery for StudentsService<S, U>
where
    S: StudentRepository,
    U: UserRepository,
{
    async fn get_student(&self, id: &StudentId) -> Result<Student, Error> {
        self.require_student(id).await
    }

    async fn list_students(&self, teacher_id: Option<UserId>) -> Result<Vec<Student>, Error> {
        let listed = match teacher_id {
            Some(teacher_id) => self.students.list_by_teacher(&teacher_id).await,
            None => self.students.list().await,
        };
        listed.map_err(map_persistence_error("student"))
    }
}

#[async_trait]
impl<S, U> StudentsCommand for StudentsService<S, U>
where
    S: StudentRepository,
    U: UserRepository,
{
    async fn create_student(&self, request: NewStudent) -> Result<Student, Error> {
        let NewStudent {
            profile,
            teacher_id,
            username,
            email,
        } = request;
        self.require_teacher(&teacher_id).await?;

        let account = User::new(username, email, None, Role::Student, self.clock.utc());
        let student = Student {
            id: StudentId::random(),
            profile,
            user_id: account.id,
            teacher_id,
        };
        self.students
            .create_with_account(&student, &account)
            .await
            .map_err(map_persistence_error("student"))?;
        info!(student_id = %student.id, user_id = %account.id, "created student");
        Ok(student)
    }

    async fn update_student(
        &self,
        id: &StudentId,
        profile: StudentProfile,
    ) -> Result<Student, Error> {
        let mut student = self.require_student(id).await?;
        student.profile = profile;
        let updated = self
            .students
            .update(&student)
            .await
            .map_err(map_persistence_error("student"))?;
        if !updated {
            return Err(Error::not_found(format!("student {id} not found")));
        }
        Ok(student)
    }

    async fn delete_student(&self, id: &StudentId) -> Result<(), Error> {
        let deleted = self
            .students
            .delete_with_account(id)
            .await
            .map_err(map_persistence_error("student"))?;
        if deleted {
            info!(student_id = %id, "deleted student and login");
            Ok(())
        } else {
            Err(Error::not_found(format!("student {id} not found")))
        }
    }
}
