//! PostgreSQL-backed [`QuestionRepository`].

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{PersistenceError, QuestionRepository};
use crate::domain::{AssignmentId, Question, QuestionId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{QuestionRow, QuestionWrite};
use super::pool::DbPool;
use super::schema::questions;

#[derive(Clone)]
pub struct DieselQuestionRepository {
    pool: DbPool,
}

impl DieselQuestionRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QuestionRepository for DieselQuestionRepository {
    async fn insert(&self, question: &Question) -> Result<(), PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(questions::table)
            .values((
                questions::id.eq(question.id.as_uuid()),
                QuestionWrite::from(&question.details),
            ))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_by_id(&self, id: &QuestionId) -> Result<Option<Question>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = questions::table
            .find(id.as_uuid())
            .select(QuestionRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(Question::from))
    }

    async fn list_by_assignment(
        &self,
        assignment_id: &AssignmentId,
    ) -> Result<Vec<Question>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = questions::table
            .filter(questions::assignment_id.eq(assignment_id.as_uuid()))
            .order((questions::created_at.asc(), questions::id.asc()))
            .select(QuestionRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(Question::from).collect())
    }

    async fn update(&self, question: &Question) -> Result<bool, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let updated = diesel::update(questions::table.find(question.id.as_uuid()))
            .set(QuestionWrite::from(&question.details))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(updated > 0)
    }

    async fn delete(&self, id: &QuestionId) -> Result<bool, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(questions::table.find(id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }
}
