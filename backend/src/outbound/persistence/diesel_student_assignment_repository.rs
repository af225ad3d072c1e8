//! PostgreSQL-backed [`StudentAssignmentRepository`].

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{PersistenceError, StudentAssignmentRepository};
use crate::domain::{AssignmentId, Progress, StudentAssignment, StudentAssignmentId, StudentId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{ProgressUpdate, StudentAssignmentRow};
use super::pool::DbPool;
use super::schema::student_assignments;

#[derive(Clone)]
pub struct DieselStudentAssignmentRepository {
    pool: DbPool,
}

impl DieselStudentAssignmentRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StudentAssignmentRepository for DieselStudentAssignmentRepository {
    async fn insert(&self, link: &StudentAssignment) -> Result<(), PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(student_assignments::table)
            .values(StudentAssignmentRow::from(link))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_by_id(
        &self,
        id: &StudentAssignmentId,
    ) -> Result<Option<StudentAssignment>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        student_assignments::table
            .find(id.as_uuid())
            .select(StudentAssignmentRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(StudentAssignment::try_from)
            .transpose()
    }

    async fn find_by_pair(
        &self,
        student_id: &StudentId,
        assignment_id: &AssignmentId,
    ) -> Result<Option<StudentAssignment>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        student_assignments::table
            .filter(student_assignments::student_id.eq(student_id.as_uuid()))
            .filter(student_assignments::assignment_id.eq(assignment_id.as_uuid()))
            .select(StudentAssignmentRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(StudentAssignment::try_from)
            .transpose()
    }

    async fn list_by_student(
        &self,
        student_id: &StudentId,
    ) -> Result<Vec<StudentAssignment>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        student_assignments::table
            .filter(student_assignments::student_id.eq(student_id.as_uuid()))
            .order(student_assignments::id.asc())
            .select(StudentAssignmentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?
            .into_iter()
            .map(StudentAssignment::try_from)
            .collect()
    }

    async fn update_progress(
        &self,
        id: &StudentAssignmentId,
        progress: &Progress,
    ) -> Result<bool, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let updated = diesel::update(student_assignments::table.find(id.as_uuid()))
            .set(ProgressUpdate::from(progress))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(updated > 0)
    }

    async fn delete(&self, id: &StudentAssignmentId) -> Result<bool, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(student_assignments::table.find(id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }
}
