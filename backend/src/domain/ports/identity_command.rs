//! Driving port for the identity bridge.
//!
//! Reconciles a verified external identity with the local user directory.

use async_trait::async_trait;

use crate::domain::{Error, Registration, SignIn, User};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityCommand: Send + Sync {
    /// Insert a user for a new Firebase UID or overwrite the existing record.
    async fn register_or_update_user(&self, registration: Registration) -> Result<User, Error>;

    /// Verify the token in `request` and upsert the matching user.
    async fn sign_in(&self, request: SignIn) -> Result<User, Error>;
}
