//! Driving port for user mutations.
use async_trait::async_trait;

use crate::domain::{Error, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersCommand: Send + Sync {
    /// Delete a user that no student owns.
    async fn delete_user(&self, id: &UserId) -> Result<(), Error>;
}
