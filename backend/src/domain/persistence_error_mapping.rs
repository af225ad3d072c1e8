//! Translation of repository failures into domain errors.

use tracing::error;

use super::Error;
use super::ports::PersistenceError;

/// Build a mapper that names `resource` in the resulting message.
///
/// Connection failures become `service_unavailable`, uniqueness and
/// referential violations become `conflict`, and query failures become
/// `internal` after being logged.
pub(crate) fn map_persistence_error(resource: &'static str) -> impl Fn(PersistenceError) -> Error {
    move |failure| match failure {
        PersistenceError::Connection { message } => {
            Error::service_unavailable(format!("{resource} repository unavailable: {message}"))
        }
        PersistenceError::Query { message } => {
            error!(resource, %message, "repository query failed");
            Error::internal(format!("{resource} repository error: {message}"))
        }
        PersistenceError::Duplicate { message } => Error::conflict(message),
        PersistenceError::Constraint { message } => Error::conflict(message),
    }
}
