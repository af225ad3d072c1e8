//! Outbound adapters implementing the domain's driven ports.
//!
//! - **persistence**: PostgreSQL repositories on Diesel
//! - **firebase**: ID token verification against Google's signing keys
//! - **cloudinary**: signed file uploads
//!
//! Adapters translate between domain types and wire or row formats. They
//! hold no business rules.

pub mod cloudinary;
pub mod firebase;
pub mod persistence;
