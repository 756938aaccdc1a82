use std::path::PathBuf;

use tinyhttp::storage::{DirectoryStore, FileStore, MemoryStore, StorageError, validate_name};

fn scratch_dir(tag: &str) -> PathBuf {
    std::env::temp_dir().join(format!("tinyhttp-{}-{}", tag, std::process::id()))
}

#[test]
fn test_validate_name() {
    assert!(validate_name("a.txt").is_ok());
    assert!(validate_name("..hidden").is_ok());

    for bad in ["", ".", "..", "a/b", "../etc/passwd", "a\\b", "nul\0"] {
        assert!(matches!(validate_name(bad), Err(StorageError::InvalidName(_))), "{bad:?}");
    }
}

#[tokio::test]
async fn test_memory_store_read_write_delete() {
    let store = MemoryStore::new();

    assert!(matches!(store.read("k").await, Err(StorageError::NotFound)));

    store.write("k", b"v1").await.unwrap();
    store.write("k", b"v2").await.unwrap();
    assert_eq!(store.read("k").await.unwrap(), b"v2".to_vec());
    assert_eq!(store.len().await, 1);

    store.delete("k").await.unwrap();
    store.delete("k").await.unwrap();
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_directory_store_round_trip() {
    let dir = scratch_dir("dir-store");
    let store = DirectoryStore::open(&dir).await.unwrap();

    store.write("a.txt", b"contents").await.unwrap();
    assert_eq!(store.read("a.txt").await.unwrap(), b"contents".to_vec());
    assert_eq!(std::fs::read(dir.join("a.txt")).unwrap(), b"contents".to_vec());

    store.delete("a.txt").await.unwrap();
    assert!(matches!(store.read("a.txt").await, Err(StorageError::NotFound)));

    // deleting again is fine
    store.delete("a.txt").await.unwrap();

    std::fs::remove_dir_all(&dir).unwrap();
}

#[tokio::test]
async fn test_directory_store_rejects_traversal() {
    let dir = scratch_dir("dir-traversal");
    let store = DirectoryStore::open(&dir).await.unwrap();

    assert!(matches!(
        store.write("..", b"x").await,
        Err(StorageError::InvalidName(_))
    ));
    assert!(matches!(
        store.read("../Cargo.toml").await,
        Err(StorageError::InvalidName(_))
    ));

    std::fs::remove_dir_all(&dir).unwrap();
}
