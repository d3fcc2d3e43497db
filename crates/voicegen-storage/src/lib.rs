#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod error;
mod key;
mod store;

pub use error::{Result, StorageError};
pub use store::{AudioStore, S3AudioStore, StoredObject};
