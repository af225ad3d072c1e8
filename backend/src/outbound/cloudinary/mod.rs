//! Cloudinary upload adapter implementing the `FileStore` port.

mod http_store;
mod signature;

pub use http_store::{CloudinaryConfig, CloudinaryFileStore};
