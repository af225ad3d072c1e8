//! Identity bridge service.
//!
//! Verifies Firebase ID tokens and reconciles the asserted identity with the
//! local user directory. A Firebase UID maps to at most one user; signing in
//! again overwrites that user's username, email and role. The first sign-in
//! for an email that belongs to an unclaimed account, such as a student login
//! created by a teacher, claims that account instead of creating another.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{info, warn};

use crate::domain::ports::{IdentityCommand, IdentityVerifier, IdentityVerifierError, UserRepository};
use crate::domain::{
    EmailAddress, Error, FirebaseUid, Registration, Role, SignIn, User, Username, VerifiedIdentity,
};

use super::persistence_error_mapping::map_persistence_error;

/// Identity service implementing [`IdentityCommand`].
#[derive(Clone)]
pub struct IdentityService<U, V> {
    users: Arc<U>,
    verifier: Arc<V>,
    clock: Arc<dyn Clock>,
}

impl<U, V> IdentityService<U, V> {
    /// Create a service over a user repository and token verifier.
    pub fn new(users: Arc<U>, verifier: Arc<V>, clock: Arc<dyn Clock>) -> Self {
        Self {
            users,
            verifier,
            clock,
        }
    }
}

fn map_verifier_error(error: IdentityVerifierError) -> Error {
    match error {
        IdentityVerifierError::InvalidToken { message } => {
            info!(%message, "identity token rejected");
            Error::unauthorized("invalid identity token")
        }
        IdentityVerifierError::Unavailable { message } => {
            Error::service_unavailable(format!("identity provider unavailable: {message}"))
        }
    }
}

/// Pick a username: explicit request value, then the token display name,
/// then the email local part, then one derived from the UID.
fn choose_username(
    requested: Option<Username>,
    identity: &VerifiedIdentity,
    email: &EmailAddress,
) -> Result<Username, Error> {
    requested
        .or_else(|| identity.name.as_deref().and_then(Username::derive_from))
        .or_else(|| Username::derive_from(email.local_part()))
        .or_else(|| Username::derive_from(&format!("user-{}", identity.uid.as_str())))
        .ok_or_else(|| Error::invalid_request("unable to derive a username"))
}

#[async_trait]
impl<U, V> IdentityCommand for IdentityService<U, V>
where
    U: UserRepository,
    V: IdentityVerifier,
{
    async fn register_or_update_user(&self, registration: Registration) -> Result<User, Error> {
        let Registration {
            username,
            email,
            firebase_uid,
            role,
        } = registration;
        let now = self.clock.utc();

        let linked = self
            .users
            .find_by_firebase_uid(&firebase_uid)
            .await
            .map_err(map_persistence_error("user"))?;
        let existing = match linked {
            Some(user) => Some(user),
            None => self
                .users
                .find_unclaimed_by_email(&email)
                .await
                .map_err(map_persistence_error("user"))?,
        };

        match existing {
            Some(mut user) => {
                if user.role == Role::Teacher && role == Role::Student {
                    warn!(user_id = %user.id, "sign-in downgraded a teacher to student");
                }
                if user.firebase_uid.is_none() {
                    info!(user_id = %user.id, "claimed provisioned account");
                }
                user.firebase_uid = Some(firebase_uid);
                user.username = username;
                user.email = email;
                user.role = role;
                user.updated_at = now;
                self.users
                    .update(&user)
                    .await
                    .map_err(map_persistence_error("user"))?;
                Ok(user)
            }
            None => {
                let user = User::new(username, email, Some(firebase_uid), role, now);
                self.users
                    .insert(&user)
                    .await
                    .map_err(map_persistence_error("user"))?;
                info!(user_id = %user.id, role = %user.role, "registered user");
                Ok(user)
            }
        }
    }

    async fn sign_in(&self, request: SignIn) -> Result<User, Error> {
        let identity = self
            .verifier
            .verify(&request.token)
            .await
            .map_err(map_verifier_error)?;
        let raw_email = identity
            .email
            .as_deref()
            .ok_or_else(|| Error::invalid_request("identity token carries no email"))?;
        let email = EmailAddress::new(raw_email)?;
        let username = choose_username(request.username, &identity, &email)?;
        let firebase_uid: FirebaseUid = identity.uid;

        self.register_or_update_user(Registration {
            username,
            email,
            firebase_uid,
            role: request.role.unwrap_or_default(),
        })
        .await
    }
}
