//! Driving port for user lookups.
use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Fetch one user, or `not_found`.
    async fn get_user(&self, id: &UserId) -> Result<User, Error>;
}
