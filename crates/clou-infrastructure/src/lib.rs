//! Infrastructure layer: platform paths and file-backed storage for the
//! clou client.

pub mod config_storage;
pub mod credential_storage;
pub mod paths;

pub use config_storage::ConfigStorage;
pub use credential_storage::{CredentialStorage, CredentialStorageError};
pub use paths::{ClouPaths, PathError};
