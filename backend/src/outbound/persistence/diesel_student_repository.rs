//! PostgreSQL-backed [`StudentRepository`].
//!
//! A student and their login account are written and removed together in
//! one transaction.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncConnection, RunQueryDsl};
use tracing::debug;

use crate::domain::ports::{PersistenceError, StudentRepository};
use crate::domain::{Student, StudentId, User, UserId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewStudentRow, StudentRow, StudentUpdate, UserRow};
use super::pool::DbPool;
use super::schema::{students, users};

#[derive(Clone)]
pub struct DieselStudentRepository {
    pool: DbPool,
}

impl DieselStudentRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StudentRepository for DieselStudentRepository {
    async fn create_with_account(
        &self,
        student: &Student,
        account: &User,
    ) -> Result<(), PersistenceError> {
        let user_row = UserRow::from(account);
        let student_row = NewStudentRow::from(student);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        conn.transaction(|conn| {
            async move {
                diesel::insert_into(users::table)
                    .values(&user_row)
                    .execute(conn)
                    .await?;
                diesel::insert_into(students::table)
                    .values(&student_row)
                    .execute(conn)
                    .await?;
                Ok(())
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }

    async fn find_by_id(&self, id: &StudentId) -> Result<Option<Student>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = students::table
            .find(id.as_uuid())
            .select(StudentRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(Student::from))
    }

    async fn find_by_user_id(&self, user_id: &UserId) -> Result<Option<Student>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = students::table
            .filter(students::user_id.eq(user_id.as_uuid()))
            .select(StudentRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(Student::from))
    }

    async fn list(&self) -> Result<Vec<Student>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = students::table
            .order((students::created_at.asc(), students::id.asc()))
            .select(StudentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(Student::from).collect())
    }

    async fn list_by_teacher(&self, teacher_id: &UserId) -> Result<Vec<Student>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = students::table
            .filter(students::teacher_id.eq(teacher_id.as_uuid()))
            .order((students::created_at.asc(), students::id.asc()))
            .select(StudentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(Student::from).collect())
    }

    async fn update(&self, student: &Student) -> Result<bool, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let updated = diesel::update(students::table.find(student.id.as_uuid()))
            .set(StudentUpdate::from(&student.profile))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(updated > 0)
    }

    async fn delete_with_account(&self, id: &StudentId) -> Result<bool, PersistenceError> {
        let student_id = *id.as_uuid();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = conn
            .transaction(|conn| {
                async move {
                    let owner: Option<uuid::Uuid> = diesel::delete(students::table.find(student_id))
                        .returning(students::user_id)
                        .get_result(conn)
                        .await
                        .optional()?;
                    let Some(user_id) = owner else {
                        return Ok(false);
                    };
                    diesel::delete(users::table.find(user_id))
                        .execute(conn)
                        .await?;
                    debug!(%student_id, %user_id, "deleted student and account");
                    Ok(true)
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted)
    }
}
