//! Little Learners backend library.
//!
//! The domain core and its ports live in [`domain`]; HTTP handlers in
//! [`inbound`] drive it and [`outbound`] adapters implement its driven ports.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
