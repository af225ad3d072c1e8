//! Subject registry model.
//!
//! Subjects are scoped by the owning teacher's Firebase UID rather than a
//! local user id, so ownership checks compare verified external identities.

use super::validation::{FieldError, required_text};
use super::{FirebaseUid, SubjectId};

/// Validated subject fields a teacher can edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectDetails {
    pub name: String,
    pub description: String,
    pub grade_level: String,
}

impl SubjectDetails {
    /// Validate raw subject fields. Only the name is mandatory.
    pub fn new(name: &str, description: &str, grade_level: &str) -> Result<Self, FieldError> {
        Ok(Self {
            name: required_text("name", name)?,
            description: description.trim().to_owned(),
            grade_level: grade_level.trim().to_owned(),
        })
    }
}

/// A subject owned by one teacher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject {
    pub id: SubjectId,
    pub details: SubjectDetails,
    pub teacher_uid: FirebaseUid,
}

impl Subject {
    /// Whether `uid` owns this subject.
    #[must_use]
    pub fn is_owned_by(&self, uid: &FirebaseUid) -> bool {
        &self.teacher_uid == uid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn details_require_a_name() {
        let err = SubjectDetails::new("  ", "desc", "5").expect_err("blank name");
        assert_eq!(err.field, "name");
    }

    #[test]
    fn ownership_compares_uids() {
        let owner = FirebaseUid::new("teacher-1").expect("uid");
        let other = FirebaseUid::new("teacher-2").expect("uid");
        let subject = Subject {
            id: SubjectId::random(),
            details: SubjectDetails::new("Maths", "", "").expect("details"),
            teacher_uid: owner.clone(),
        };
        assert!(subject.is_owned_by(&owner));
        assert!(!subject.is_owned_by(&other));
    }
}
