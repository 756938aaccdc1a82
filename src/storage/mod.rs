//! Named blob storage behind the `/files/` routes.
//!
//! The server only needs read/write/delete by name. Names come straight
//! from the request path, so every store validates them with
//! [`validate_name`] before touching its backing medium.

pub mod directory;
pub mod memory;

use async_trait::async_trait;

pub use crate::error::StorageError;
pub use directory::DirectoryStore;
pub use memory::MemoryStore;

#[async_trait]
pub trait FileStore: Send + Sync + std::fmt::Debug {
    /// Returns the stored bytes, or [`StorageError::NotFound`].
    async fn read(&self, name: &str) -> Result<Vec<u8>, StorageError>;

    /// Stores `data` under `name`, replacing any previous value.
    async fn write(&self, name: &str, data: &[u8]) -> Result<(), StorageError>;

    /// Removes `name`. Removing a missing entry succeeds.
    async fn delete(&self, name: &str) -> Result<(), StorageError>;
}

/// Rejects names that could escape a flat namespace.
///
/// # Example
///
/// ```
/// # use tinyhttp::storage::validate_name;
/// assert!(validate_name("notes.txt").is_ok());
/// assert!(validate_name("..").is_err());
/// assert!(validate_name("a/b").is_err());
/// ```
pub fn validate_name(name: &str) -> Result<&str, StorageError> {
    let bad = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\', '\0']);

    if bad {
        return Err(StorageError::InvalidName(name.to_string()));
    }
    Ok(name)
}
