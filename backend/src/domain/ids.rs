//! Strongly typed UUID identifiers for every aggregate.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Raised when a string is not a valid identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{label} must be a valid UUID")]
pub struct InvalidId {
    /// Which identifier failed to parse.
    pub label: &'static str,
}

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident => $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Generate a new random identifier.
            #[must_use]
            pub fn random() -> Self {
                Self(Uuid::new_v4())
            }

            /// Wrap an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Parse an identifier from its canonical string form.
            pub fn parse(raw: &str) -> Result<Self, InvalidId> {
                Uuid::parse_str(raw.trim())
                    .map(Self)
                    .map_err(|_| InvalidId { label: $label })
            }

            /// Underlying UUID.
            #[must_use]
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl std::str::FromStr for $name {
            type Err = InvalidId;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl From<Uuid> for $name {
            fn from(value: Uuid) -> Self {
                Self(value)
            }
        }
    };
}

define_id!(
    /// Identifier of a [`crate::domain::User`].
    UserId => "userId"
);
define_id!(
    /// Identifier of a [`crate::domain::Student`].
    StudentId => "studentId"
);
define_id!(
    /// Identifier of a [`crate::domain::Subject`].
    SubjectId => "subjectId"
);
define_id!(
    /// Identifier of an [`crate::domain::Assignment`].
    AssignmentId => "assignmentId"
);
define_id!(
    /// Identifier of a [`crate::domain::Question`].
    QuestionId => "questionId"
);
define_id!(
    /// Identifier of a [`crate::domain::StudentAnswer`] ledger row.
    AnswerId => "answerId"
);
define_id!(
    /// Identifier of a [`crate::domain::StudentAssignment`] link.
    StudentAssignmentId => "studentAssignmentId"
);

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn parse_round_trips_display() {
        let id = StudentId::random();
        let parsed = StudentId::parse(&id.to_string()).expect("valid id");
        assert_eq!(parsed, id);
    }

    #[rstest]
    #[case("")]
    #[case("42")]
    #[case("not-a-uuid")]
    fn parse_rejects_invalid_input(#[case] raw: &str) {
        let err = QuestionId::parse(raw).expect_err("invalid id");
        assert_eq!(err.label, "questionId");
        assert_eq!(err.to_string(), "questionId must be a valid UUID");
    }

    #[test]
    fn serialises_as_bare_uuid() {
        let uuid = Uuid::new_v4();
        let value = serde_json::to_value(UserId::from_uuid(uuid)).expect("serialise id");
        assert_eq!(value, serde_json::json!(uuid.to_string()));
    }
}
