//! PostgreSQL-backed append-only [`AnswerRepository`].

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{AnswerRepository, PersistenceError};
use crate::domain::{AnswerId, AssignmentId, ResultRow, StudentAnswer, StudentId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{AnswerRow, ResultTuple, result_row};
use super::pool::DbPool;
use super::schema::{questions, student_answers, students};

#[derive(Clone)]
pub struct DieselAnswerRepository {
    pool: DbPool,
}

impl DieselAnswerRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AnswerRepository for DieselAnswerRepository {
    async fn insert(&self, answer: &StudentAnswer) -> Result<(), PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(student_answers::table)
            .values(AnswerRow::from(answer))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_by_id(&self, id: &AnswerId) -> Result<Option<StudentAnswer>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = student_answers::table
            .find(id.as_uuid())
            .select(AnswerRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(StudentAnswer::from))
    }

    async fn list_by_student(
        &self,
        student_id: &StudentId,
    ) -> Result<Vec<StudentAnswer>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = student_answers::table
            .filter(student_answers::student_id.eq(student_id.as_uuid()))
            .order((student_answers::submitted_at.asc(), student_answers::id.asc()))
            .select(AnswerRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(StudentAnswer::from).collect())
    }

    async fn result_rows(
        &self,
        assignment_id: &AssignmentId,
        student_id: Option<StudentId>,
    ) -> Result<Vec<ResultRow>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mut query = student_answers::table
            .inner_join(questions::table)
            .inner_join(students::table)
            .filter(questions::assignment_id.eq(assignment_id.as_uuid()))
            .order((student_answers::submitted_at.asc(), student_answers::id.asc()))
            .select((
                student_answers::student_id,
                students::full_name,
                student_answers::question_id,
                questions::question_text,
                student_answers::chosen_answer,
                student_answers::is_correct,
                student_answers::submitted_at,
            ))
            .into_boxed();
        if let Some(id) = student_id {
            query = query.filter(student_answers::student_id.eq(*id.as_uuid()));
        }
        let rows: Vec<ResultTuple> = query.load(&mut conn).await.map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(result_row).collect())
    }
}
