//! Port abstraction for user persistence adapters.
use async_trait::async_trait;

use crate::domain::{EmailAddress, FirebaseUid, User, UserId};

use super::PersistenceError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user record.
    async fn insert(&self, user: &User) -> Result<(), PersistenceError>;

    /// Overwrite the mutable fields of an existing record.
    async fn update(&self, user: &User) -> Result<(), PersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, PersistenceError>;

    /// Fetch the user linked to a verified Firebase identity.
    async fn find_by_firebase_uid(
        &self,
        uid: &FirebaseUid,
    ) -> Result<Option<User>, PersistenceError>;

    /// Fetch the account with `email` that no Firebase identity has claimed
    /// yet, such as a login provisioned for a new student.
    async fn find_unclaimed_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, PersistenceError>;

    /// Delete a user. Returns `false` when no row matched.
    async fn delete(&self, id: &UserId) -> Result<bool, PersistenceError>;
}
