use std::sync::Arc;

use async_trait::async_trait;
use tinyhttp::http::request::{Method, Request, RequestBuilder};
use tinyhttp::http::response::StatusCode;
use tinyhttp::routing::Handler;
use tinyhttp::storage::{FileStore, MemoryStore, StorageError};

fn request(method: Method, path: &str) -> Request {
    RequestBuilder::new().method(method).path(path).build().unwrap()
}

/// A store whose backing medium always fails.
#[derive(Debug)]
struct BrokenStore;

#[async_trait]
impl FileStore for BrokenStore {
    async fn read(&self, _name: &str) -> Result<Vec<u8>, StorageError> {
        Err(std::io::Error::other("disk on fire").into())
    }

    async fn write(&self, _name: &str, _data: &[u8]) -> Result<(), StorageError> {
        Err(std::io::Error::other("disk on fire").into())
    }

    async fn delete(&self, _name: &str) -> Result<(), StorageError> {
        Err(std::io::Error::other("disk on fire").into())
    }
}

#[tokio::test]
async fn test_root_is_empty_ok() {
    let response = Handler::Root.handle(&request(Method::GET, "/")).await;

    assert_eq!(response.status, StatusCode::Ok);
    assert!(response.body.is_empty());
}

#[tokio::test]
async fn test_user_agent_echoes_header() {
    let req = RequestBuilder::new()
        .path("/user-agent")
        .header("User-Agent", "foo/1.0")
        .build()
        .unwrap();

    let response = Handler::UserAgent.handle(&req).await;

    assert_eq!(response.status, StatusCode::Ok);
    assert_eq!(response.body, b"foo/1.0".to_vec());
    assert_eq!(response.header("Content-Type"), Some("text/plain"));
}

#[tokio::test]
async fn test_user_agent_missing_header_is_empty() {
    let response = Handler::UserAgent.handle(&request(Method::GET, "/user-agent")).await;

    assert_eq!(response.status, StatusCode::Ok);
    assert!(response.body.is_empty());
}

#[tokio::test]
async fn test_echo_returns_value_verbatim() {
    let response = Handler::Echo.handle(&request(Method::GET, "/echo/hello%20world")).await;

    assert_eq!(response.status, StatusCode::Ok);
    assert_eq!(response.body, b"hello%20world".to_vec());
    assert_eq!(response.header("content-type"), Some("text/plain"));
}

#[tokio::test]
async fn test_echo_empty_value_is_not_found() {
    let response = Handler::Echo.handle(&request(Method::GET, "/echo/")).await;

    assert_eq!(response.status, StatusCode::NotFound);
}

#[tokio::test]
async fn test_echo_is_get_only() {
    let response = Handler::Echo.handle(&request(Method::POST, "/echo/abc")).await;

    assert_eq!(response.status, StatusCode::MethodNotAllowed);
}

#[tokio::test]
async fn test_files_post_then_get_round_trip() {
    let store = Arc::new(MemoryStore::new());
    let handler = Handler::Files(store.clone());

    let post = RequestBuilder::new()
        .method(Method::POST)
        .path("/files/a.txt")
        .body(b"B".to_vec())
        .build()
        .unwrap();
    let created = handler.handle(&post).await;
    assert_eq!(created.status, StatusCode::Created);
    assert!(created.body.is_empty());

    let fetched = handler.handle(&request(Method::GET, "/files/a.txt")).await;
    assert_eq!(fetched.status, StatusCode::Ok);
    assert_eq!(fetched.body, b"B".to_vec());
    assert_eq!(fetched.header("Content-Type"), Some("application/octet-stream"));
}

#[tokio::test]
async fn test_files_post_overwrites() {
    let store = Arc::new(MemoryStore::new());
    store.write("a.txt", b"old").await.unwrap();
    let handler = Handler::Files(store.clone());

    let post = RequestBuilder::new()
        .method(Method::POST)
        .path("/files/a.txt")
        .body(b"new".to_vec())
        .build()
        .unwrap();
    handler.handle(&post).await;

    assert_eq!(store.read("a.txt").await.unwrap(), b"new".to_vec());
}

#[tokio::test]
async fn test_files_get_missing_is_not_found() {
    let handler = Handler::Files(Arc::new(MemoryStore::new()));

    let response = handler.handle(&request(Method::GET, "/files/missing.txt")).await;

    assert_eq!(response.status, StatusCode::NotFound);
    assert!(response.body.is_empty());
}

#[tokio::test]
async fn test_files_delete_is_idempotent() {
    let store = Arc::new(MemoryStore::new());
    store.write("gone.txt", b"x").await.unwrap();
    let handler = Handler::Files(store.clone());

    let first = handler.handle(&request(Method::DELETE, "/files/gone.txt")).await;
    let second = handler.handle(&request(Method::DELETE, "/files/missing.txt")).await;

    assert_eq!(first.status, StatusCode::Ok);
    assert_eq!(second.status, StatusCode::Ok);
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_files_other_methods_not_allowed() {
    let handler = Handler::Files(Arc::new(MemoryStore::new()));

    for method in [Method::PUT, Method::PATCH, Method::Other("BREW".to_string())] {
        let response = handler.handle(&request(method, "/files/a.txt")).await;
        assert_eq!(response.status, StatusCode::MethodNotAllowed);
    }
}

#[tokio::test]
async fn test_files_rejects_traversal_names() {
    let handler = Handler::Files(Arc::new(MemoryStore::new()));

    for path in ["/files/..", "/files/.", "/files/..\\secret"] {
        let response = handler.handle(&request(Method::GET, path)).await;
        assert_eq!(response.status, StatusCode::BadRequest, "{path}");
    }
}

#[tokio::test]
async fn test_files_storage_failures_are_500() {
    let handler = Handler::Files(Arc::new(BrokenStore));

    let post = RequestBuilder::new()
        .method(Method::POST)
        .path("/files/a.txt")
        .body(b"B".to_vec())
        .build()
        .unwrap();

    for req in [
        post,
        request(Method::GET, "/files/a.txt"),
        request(Method::DELETE, "/files/a.txt"),
    ] {
        let response = handler.handle(&req).await;
        assert_eq!(response.status, StatusCode::InternalServerError);
    }
}
