//! Test utilities for the backend crate.
//!
//! Shared by unit tests in `src/` and integration tests in `tests/`; compiled
//! for tests and behind the `test-support` feature.

pub mod fixtures;
pub mod memory;
pub mod stubs;

use std::sync::Arc;

use crate::inbound::http::state::{Adapters, HttpState, HttpStatePorts};

pub use fixtures::{
    FixedClock, sample_assignment, sample_profile, sample_student, sample_teacher,
};
pub use memory::MemoryDatabase;
pub use stubs::{MemoryFileStore, StubIdentityVerifier};

/// Wire the real domain services over in-memory adapters and a fixed clock.
///
/// ```
/// use std::sync::Arc;
/// use learners_backend::test_support::{
///     MemoryDatabase, MemoryFileStore, StubIdentityVerifier, memory_http_state,
/// };
///
/// let state = memory_http_state(
///     Arc::new(MemoryDatabase::new()),
///     StubIdentityVerifier::default(),
///     Arc::new(MemoryFileStore::default()),
/// );
/// assert_eq!(state.upload_limit, 10 * 1024 * 1024);
/// ```
pub fn memory_http_state(
    db: Arc<MemoryDatabase>,
    verifier: StubIdentityVerifier,
    store: Arc<MemoryFileStore>,
) -> HttpState {
    HttpState::new(HttpStatePorts::from_adapters(Adapters {
        users: db.clone(),
        students: db.clone(),
        subjects: db.clone(),
        assignments: db.clone(),
        questions: db.clone(),
        answers: db.clone(),
        links: db,
        verifier: Arc::new(verifier),
        store,
        clock: Arc::new(FixedClock::default()),
    }))
}
