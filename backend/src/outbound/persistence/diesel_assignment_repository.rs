//! PostgreSQL-backed [`AssignmentRepository`].
//!
//! Deleting an assignment cascades to its questions, their answers and any
//! student links through the foreign keys.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{AssignmentRepository, PersistenceError};
use crate::domain::{Assignment, AssignmentId, UserId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{AssignmentRow, AssignmentWrite};
use super::pool::DbPool;
use super::schema::assignments;

#[derive(Clone)]
pub struct DieselAssignmentRepository {
    pool: DbPool,
}

impl DieselAssignmentRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AssignmentRepository for DieselAssignmentRepository {
    async fn insert(&self, assignment: &Assignment) -> Result<(), PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(assignments::table)
            .values((
                assignments::id.eq(assignment.id.as_uuid()),
                AssignmentWrite::from(&assignment.details),
            ))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_by_id(&self, id: &AssignmentId) -> Result<Option<Assignment>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = assignments::table
            .find(id.as_uuid())
            .select(AssignmentRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(Assignment::from))
    }

    async fn list(&self) -> Result<Vec<Assignment>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = assignments::table
            .order((assignments::created_at.asc(), assignments::id.asc()))
            .select(AssignmentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(Assignment::from).collect())
    }

    async fn list_by_teacher(&self, teacher_id: &UserId) -> Result<Vec<Assignment>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = assignments::table
            .filter(assignments::teacher_id.eq(teacher_id.as_uuid()))
            .order((assignments::created_at.asc(), assignments::id.asc()))
            .select(AssignmentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(Assignment::from).collect())
    }

    async fn update(&self, assignment: &Assignment) -> Result<bool, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let updated = diesel::update(assignments::table.find(assignment.id.as_uuid()))
            .set(AssignmentWrite::from(&assignment.details))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(updated > 0)
    }

    async fn delete(&self, id: &AssignmentId) -> Result<bool, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(assignments::table.find(id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }
}
