use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use super::{FileStore, StorageError, validate_name};

/// Stores each entry as a file in one directory.
///
/// Writes to the same name from concurrent connections are not serialized;
/// the last writer wins.
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    /// Opens a store rooted at `root`, creating the directory if needed.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let root = root.into();
        fs::create_dir_all(&root).await?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, name: &str) -> Result<PathBuf, StorageError> {
        Ok(self.root.join(validate_name(name)?))
    }
}

#[async_trait]
impl FileStore for DirectoryStore {
    async fn read(&self, name: &str) -> Result<Vec<u8>, StorageError> {
        let path = self.path_for(name)?;
        match fs::read(&path).await {
            Ok(data) => Ok(data),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(StorageError::NotFound),
            Err(e) => Err(e.into()),
        }
    }

    async fn write(&self, name: &str, data: &[u8]) -> Result<(), StorageError> {
        let path = self.path_for(name)?;
        fs::write(&path, data).await?;
        Ok(())
    }

    async fn delete(&self, name: &str) -> Result<(), StorageError> {
        let path = self.path_for(name)?;
        match fs::remove_file(&path).await {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}
