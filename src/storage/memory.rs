use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{FileStore, StorageError, validate_name};

/// In-process store, used by tests and when no disk is wanted.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl FileStore for MemoryStore {
    async fn read(&self, name: &str) -> Result<Vec<u8>, StorageError> {
        let name = validate_name(name)?;
        self.entries
            .read()
            .await
            .get(name)
            .cloned()
            .ok_or(StorageError::NotFound)
    }

    async fn write(&self, name: &str, data: &[u8]) -> Result<(), StorageError> {
        let name = validate_name(name)?;
        self.entries
            .write()
            .await
            .insert(name.to_string(), data.to_vec());
        Ok(())
    }

    async fn delete(&self, name: &str) -> Result<(), StorageError> {
        let name = validate_name(name)?;
        self.entries.write().await.remove(name);
        Ok(())
    }
}
