//! Shared helpers for backend integration tests.

pub mod embedded_postgres;
