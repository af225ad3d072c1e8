//! Shared translation of pool and Diesel failures into [`PersistenceError`].

use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::PersistenceError;

use super::pool::PoolError;

/// Unique and foreign-key constraints with a caller-facing description.
const CONSTRAINT_MESSAGES: &[(&str, &str)] = &[
    ("users_username_key", "username is already taken"),
    ("users_email_key", "email is already registered"),
    ("users_firebase_uid_key", "identity is already linked to another user"),
    ("students_reg_num_key", "registration number is already in use"),
    ("students_user_id_key", "user account already belongs to a student"),
    (
        "student_assignments_pair_key",
        "student is already assigned this assignment",
    ),
    ("students_teacher_id_fkey", "user is still the teacher of students"),
    ("assignments_teacher_id_fkey", "user still owns assignments"),
];

fn describe(info: &dyn DatabaseErrorInformation, fallback: &str) -> String {
    info.constraint_name()
        .and_then(|name| {
            CONSTRAINT_MESSAGES
                .iter()
                .find(|(constraint, _)| *constraint == name)
                .map(|(_, message)| (*message).to_owned())
        })
        .unwrap_or_else(|| fallback.to_owned())
}

/// Map a pool failure to a connection error.
pub(super) fn map_pool_error(error: PoolError) -> PersistenceError {
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    PersistenceError::connection(message)
}

/// Map a Diesel failure, naming violated constraints where known.
pub(super) fn map_diesel_error(error: DieselError) -> PersistenceError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            PersistenceError::duplicate(describe(info.as_ref(), "record already exists"))
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
            PersistenceError::constraint(describe(info.as_ref(), "record is still referenced"))
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            PersistenceError::connection("database connection error")
        }
        DieselError::QueryBuilderError(_) => PersistenceError::query("database query error"),
        _ => PersistenceError::query("database error"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[derive(Debug)]
    struct Info(Option<&'static str>);

    impl DatabaseErrorInformation for Info {
        fn message(&self) -> &str {
            "violation"
        }
        fn details(&self) -> Option<&str> {
            None
        }
        fn hint(&self) -> Option<&str> {
            None
        }
        fn table_name(&self) -> Option<&str> {
            None
        }
        fn column_name(&self) -> Option<&str> {
            None
        }
        fn constraint_name(&self) -> Option<&str> {
            self.0
        }
        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    fn db_error(kind: DatabaseErrorKind, constraint: Option<&'static str>) -> DieselError {
        DieselError::DatabaseError(kind, Box::new(Info(constraint)))
    }

    #[rstest]
    #[case(
        db_error(DatabaseErrorKind::UniqueViolation, Some("users_email_key")),
        PersistenceError::duplicate("email is already registered")
    )]
    #[case(
        db_error(DatabaseErrorKind::UniqueViolation, Some("unlisted_key")),
        PersistenceError::duplicate("record already exists")
    )]
    #[case(
        db_error(DatabaseErrorKind::ForeignKeyViolation, Some("assignments_teacher_id_fkey")),
        PersistenceError::constraint("user still owns assignments")
    )]
    #[case(
        db_error(DatabaseErrorKind::ClosedConnection, None),
        PersistenceError::connection("database connection error")
    )]
    #[case(DieselError::NotFound, PersistenceError::query("database error"))]
    fn maps_diesel_failures(#[case] error: DieselError, #[case] expected: PersistenceError) {
        assert_eq!(map_diesel_error(error), expected);
    }

    #[test]
    fn pool_failures_are_connection_errors() {
        assert_eq!(
            map_pool_error(PoolError::checkout("timed out")),
            PersistenceError::connection("timed out")
        );
    }
}
