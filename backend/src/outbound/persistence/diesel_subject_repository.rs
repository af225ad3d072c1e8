//! PostgreSQL-backed [`SubjectRepository`].

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{PersistenceError, SubjectRepository};
use crate::domain::{FirebaseUid, Subject, SubjectId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewSubjectRow, SubjectRow, SubjectUpdate};
use super::pool::DbPool;
use super::schema::subjects;

#[derive(Clone)]
pub struct DieselSubjectRepository {
    pool: DbPool,
}

impl DieselSubjectRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubjectRepository for DieselSubjectRepository {
    async fn insert(&self, subject: &Subject) -> Result<(), PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(subjects::table)
            .values(NewSubjectRow::from(subject))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_by_id(&self, id: &SubjectId) -> Result<Option<Subject>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        subjects::table
            .find(id.as_uuid())
            .select(SubjectRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(Subject::try_from)
            .transpose()
    }

    async fn list_by_teacher(
        &self,
        teacher_uid: &FirebaseUid,
    ) -> Result<Vec<Subject>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        subjects::table
            .filter(subjects::teacher_uid.eq(teacher_uid.as_str()))
            .order((subjects::created_at.asc(), subjects::id.asc()))
            .select(SubjectRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?
            .into_iter()
            .map(Subject::try_from)
            .collect()
    }

    async fn update(&self, subject: &Subject) -> Result<bool, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let updated = diesel::update(subjects::table.find(subject.id.as_uuid()))
            .set(SubjectUpdate::from(&subject.details))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(updated > 0)
    }

    async fn delete(&self, id: &SubjectId) -> Result<bool, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(subjects::table.find(id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }
}
