//! Shared failure type for every repository port.
//!
//! All relational adapters fail the same ways, so repositories share one
//! error enum rather than each declaring an identical copy.

use super::define_port_error;

define_port_error! {
    /// Errors raised by repository adapters.
    pub enum PersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "repository query failed: {message}",
        /// A unique constraint rejected the write.
        Duplicate { message: String } => "duplicate record: {message}",
        /// A referential constraint rejected the write.
        Constraint { message: String } => "constraint violated: {message}",
    }
}
