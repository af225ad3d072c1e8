//! User directory model.
//!
//! Users are login-capable accounts. Teachers own students and assignments;
//! every student owns exactly one STUDENT user. Accounts created through the
//! Firebase identity bridge carry the Firebase UID that links them to their
//! external identity.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;

use super::UserId;
use super::validation::{FieldError, FieldErrorKind, required_text};

/// Minimum username length.
pub const USERNAME_MIN: usize = 3;
/// Maximum username length.
pub const USERNAME_MAX: usize = 32;

static USERNAME_RE: OnceLock<Regex> = OnceLock::new();

fn username_regex() -> &'static Regex {
    USERNAME_RE.get_or_init(|| {
        Regex::new("^[A-Za-z0-9_.-]+$")
            .unwrap_or_else(|error| panic!("username regex failed to compile: {error}"))
    })
}

/// Account role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Role {
    /// Manages students, subjects and assignments.
    Teacher,
    /// Submits answers. Self-service sign-ups default to this role.
    #[default]
    Student,
}

impl Role {
    /// Canonical upper-case name used on the wire and in storage.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Teacher => "TEACHER",
            Self::Student => "STUDENT",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "TEACHER" => Ok(Self::Teacher),
            "STUDENT" => Ok(Self::Student),
            _ => Err(FieldError::new(
                "role",
                FieldErrorKind::InvalidFormat,
                "role must be TEACHER or STUDENT",
            )),
        }
    }
}

/// Unique login name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    /// Validate a username supplied by a client.
    pub fn new(raw: &str) -> Result<Self, FieldError> {
        let value = required_text("username", raw)?;
        let length = value.chars().count();
        if length < USERNAME_MIN {
            return Err(FieldError::new(
                "username",
                FieldErrorKind::TooShort,
                format!("username must be at least {USERNAME_MIN} characters"),
            ));
        }
        if length > USERNAME_MAX {
            return Err(FieldError::new(
                "username",
                FieldErrorKind::TooLong,
                format!("username must be at most {USERNAME_MAX} characters"),
            ));
        }
        if !username_regex().is_match(&value) {
            return Err(FieldError::new(
                "username",
                FieldErrorKind::InvalidFormat,
                "username may only contain letters, digits, '.', '_' or '-'",
            ));
        }
        Ok(Self(value))
    }

    /// Derive a username from free text such as a display name.
    ///
    /// Whitespace becomes `.`, other disallowed characters are dropped and the
    /// result is truncated. Returns `None` when too little survives.
    #[must_use]
    pub fn derive_from(hint: &str) -> Option<Self> {
        let candidate: String = hint
            .trim()
            .chars()
            .filter_map(|c| {
                if c.is_whitespace() {
                    Some('.')
                } else if c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-') {
                    Some(c)
                } else {
                    None
                }
            })
            .take(USERNAME_MAX)
            .collect();
        Self::new(&candidate).ok()
    }

    /// Borrow the username.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unique e-mail address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate an address: exactly one `@` with non-empty local and domain parts.
    pub fn new(raw: &str) -> Result<Self, FieldError> {
        let value = required_text("email", raw)?;
        let mut parts = value.split('@');
        let well_formed = matches!(
            (parts.next(), parts.next(), parts.next()),
            (Some(local), Some(domain), None) if !local.is_empty() && !domain.is_empty()
        );
        if !well_formed || value.chars().any(char::is_whitespace) {
            return Err(FieldError::new(
                "email",
                FieldErrorKind::InvalidFormat,
                "email must be a valid address",
            ));
        }
        Ok(Self(value))
    }

    /// The part before `@`.
    #[must_use]
    pub fn local_part(&self) -> &str {
        self.0.split('@').next().unwrap_or_default()
    }

    /// Borrow the address.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// External identity key issued by Firebase Authentication.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FirebaseUid(String);

impl FirebaseUid {
    /// Validate a UID; only blank values are rejected.
    pub fn new(raw: &str) -> Result<Self, FieldError> {
        required_text("firebaseUid", raw).map(Self)
    }

    /// Borrow the UID.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for FirebaseUid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A login-capable account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub username: Username,
    pub email: EmailAddress,
    pub firebase_uid: Option<FirebaseUid>,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Build a fresh account with a random id, stamped at `now`.
    #[must_use]
    pub fn new(
        username: Username,
        email: EmailAddress,
        firebase_uid: Option<FirebaseUid>,
        role: Role,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: UserId::random(),
            username,
            email,
            firebase_uid,
            role,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("teacher", Role::Teacher)]
    #[case("TEACHER", Role::Teacher)]
    #[case(" Student ", Role::Student)]
    fn role_parses_case_insensitively(#[case] raw: &str, #[case] expected: Role) {
        assert_eq!(raw.parse::<Role>().expect("valid role"), expected);
    }

    #[test]
    fn role_rejects_unknown_names() {
        let err = "PRINCIPAL".parse::<Role>().expect_err("unknown role");
        assert_eq!(err.field, "role");
    }

    #[test]
    fn role_defaults_to_student() {
        assert_eq!(Role::default(), Role::Student);
    }

    #[rstest]
    #[case("ada_l")]
    #[case("m.curie-1867")]
    #[case("abc")]
    fn username_accepts_valid_names(#[case] raw: &str) {
        assert_eq!(Username::new(raw).expect("valid").as_str(), raw);
    }

    #[rstest]
    #[case("", FieldErrorKind::Empty)]
    #[case("ab", FieldErrorKind::TooShort)]
    #[case("has space", FieldErrorKind::InvalidFormat)]
    #[case("emoji😀x", FieldErrorKind::InvalidFormat)]
    fn username_rejects_invalid_names(#[case] raw: &str, #[case] kind: FieldErrorKind) {
        assert_eq!(Username::new(raw).expect_err("invalid").kind, kind);
    }

    #[test]
    fn username_rejects_overlong_names() {
        let raw = "a".repeat(USERNAME_MAX + 1);
        assert_eq!(
            Username::new(&raw).expect_err("too long").kind,
            FieldErrorKind::TooLong
        );
    }

    #[rstest]
    #[case("Ada Lovelace", Some("Ada.Lovelace"))]
    #[case("  josé  ", Some("jos"))]
    #[case("!!", None)]
    fn username_derivation_sanitises_hints(#[case] hint: &str, #[case] expected: Option<&str>) {
        let derived = Username::derive_from(hint);
        assert_eq!(derived.as_ref().map(Username::as_str), expected);
    }

    #[rstest]
    #[case("ada@example.org")]
    #[case("  grace@navy.mil ")]
    fn email_accepts_addresses(#[case] raw: &str) {
        assert!(EmailAddress::new(raw).is_ok());
    }

    #[rstest]
    #[case("no-at-sign")]
    #[case("@example.org")]
    #[case("ada@")]
    #[case("a@b@c")]
    #[case("a b@example.org")]
    fn email_rejects_malformed_addresses(#[case] raw: &str) {
        assert_eq!(
            EmailAddress::new(raw).expect_err("invalid").kind,
            FieldErrorKind::InvalidFormat
        );
    }

    #[test]
    fn email_exposes_local_part() {
        let email = EmailAddress::new("ada@example.org").expect("valid");
        assert_eq!(email.local_part(), "ada");
    }
}
