//! User directory service.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{StudentRepository, UserRepository, UsersCommand, UsersQuery};
use crate::domain::{Error, User, UserId};

use super::persistence_error_mapping::map_persistence_error;

/// Implements [`UsersQuery`] and [`UsersCommand`].
#[derive(Clone)]
pub struct UsersService<U, S> {
    users: Arc<U>,
    students: Arc<S>,
}

impl<U, S> UsersService<U, S> {
    pub fn new(users: Arc<U>, students: Arc<S>) -> Self {
        Self { users, students }
    }
}

#[async_trait]
impl<U, S> UsersQuery for UsersService<U, S>
where
    U: UserRepository,
    S: StudentRepository,
{
    async fn get_user(&self, id: &UserId) -> Result<User, Error> {
        self.users
            .find_by_id(id)
            .await
            .map_err(map_persistence_error("user"))?
            .ok_or_else(|| Error::not_found(format!("user {id} not found")))
    }
}

#[async_trait]
impl<U, S> UsersCommand for UsersService<U, S>
where
    U: UserRepository,
    S: StudentRepository,
{
    async fn delete_user(&self, id: &UserId) -> Result<(), Error> {
        let owner = self
            .students
            .find_by_user_id(id)
            .await
            .map_err(map_persistence_error("student"))?;
        if let Some(student) = owner {
            return Err(Error::conflict(format!(
                "user {id} is the login of student {}; delete the student instead",
                student.id
            )));
        }
        let deleted = self
            .users
            .delete(id)
            .await
            .map_err(map_persistence_error("user"))?;
        if deleted {
            Ok(())
        } else {
            Err(Error::not_found(format!("user {id} not found")))
        }
    }
}
