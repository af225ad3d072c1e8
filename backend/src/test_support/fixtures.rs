//! Ready-made domain values for tests.

use chrono::{DateTime, TimeZone, Utc};
use mockable::Clock;

use crate::domain::{
    Assignment, AssignmentDetails, AssignmentId, EmailAddress, FirebaseUid, Role, Student,
    StudentId, StudentProfile, StudentProfileDraft, User, UserId, Username,
};

/// A clock frozen at 2024-03-01T09:00:00Z unless built with [`FixedClock::at`].
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
    /// Freeze the clock at `now`.
    #[must_use]
    pub fn at(now: DateTime<Utc>) -> Self {
        Self(now)
    }
}

impl Default for FixedClock {
    fn default() -> Self {
        Self(at_fixture_time())
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<chrono::Local> {
        self.0.with_timezone(&chrono::Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

fn at_fixture_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

/// A teacher account with a Firebase UID derived from `username`.
pub fn sample_teacher(username: &str) -> User {
    User::new(
        valid(Username::new(username)),
        valid(EmailAddress::new(&format!("{username}@school.test"))),
        Some(valid(FirebaseUid::new(&format!("uid-{username}")))),
        Role::Teacher,
        at_fixture_time(),
    )
}

/// A valid student profile with the given registration number.
pub fn sample_profile(reg_num: &str) -> StudentProfile {
    valid(StudentProfile::try_from(StudentProfileDraft {
        full_name: "Sam Pupil".to_owned(),
        reg_num: reg_num.to_owned(),
        grade: "5".to_owned(),
        gender: "F".to_owned(),
        is_active: true,
        parent_name: Some("Pat Pupil".to_owned()),
        performance_score: Some(71.5),
    }))
}

/// A student owned by `teacher_id` with a fresh login id.
pub fn sample_student(teacher_id: UserId) -> Student {
    Student {
        id: StudentId::random(),
        profile: sample_profile("R-100"),
        user_id: UserId::random(),
        teacher_id,
    }
}

/// An assignment owned by a random teacher id.
pub fn sample_assignment() -> Assignment {
    Assignment {
        id: AssignmentId::random(),
        details: valid(AssignmentDetails::new(
            "Geography",
            None,
            None,
            UserId::random(),
        )),
    }
}

fn valid<T, E: std::fmt::Display>(result: Result<T, E>) -> T {
    match result {
        Ok(value) => value,
        Err(error) => panic!("invalid fixture value: {error}"),
    }
}
