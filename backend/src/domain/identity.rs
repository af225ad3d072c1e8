//! Identity bridge types.
//!
//! A client proves who they are with a Firebase ID token. Once verified, the
//! identity is reconciled with the local user directory and the resulting
//! [`Caller`] is kept in the session for later requests.

use zeroize::Zeroizing;

use super::validation::FieldError;
use super::{EmailAddress, FirebaseUid, Role, User, UserId, Username};

/// Opaque bearer token presented by the client. Zeroised on drop.
#[derive(Clone)]
pub struct IdToken(Zeroizing<String>);

impl IdToken {
    /// Wrap a raw token, rejecting blank input.
    pub fn new(raw: impl Into<String>) -> Result<Self, FieldError> {
        let raw = Zeroizing::new(raw.into());
        if raw.trim().is_empty() {
            return Err(FieldError::empty("idToken"));
        }
        Ok(Self(raw))
    }

    /// Borrow the raw token for verification.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Debug for IdToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("IdToken(<redacted>)")
    }
}

/// Claims extracted from a token the identity provider has vouched for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedIdentity {
    pub uid: FirebaseUid,
    pub email: Option<String>,
    pub name: Option<String>,
}

/// Input to [`crate::domain::ports::IdentityCommand::register_or_update_user`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub username: Username,
    pub email: EmailAddress,
    pub firebase_uid: FirebaseUid,
    pub role: Role,
}

/// Sign-in request carrying the token and optional profile hints.
#[derive(Debug, Clone)]
pub struct SignIn {
    pub token: IdToken,
    pub username: Option<Username>,
    pub role: Option<Role>,
}

/// The authenticated principal attached to a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub user_id: UserId,
    pub firebase_uid: FirebaseUid,
    pub role: Role,
}

impl Caller {
    /// Build the session principal for a reconciled user.
    #[must_use]
    pub fn for_user(user: &User, firebase_uid: FirebaseUid) -> Self {
        Self {
            user_id: user.id,
            firebase_uid,
            role: user.role,
        }
    }
}
