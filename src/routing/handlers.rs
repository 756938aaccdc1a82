//! Built-in request handlers.

use std::sync::Arc;

use tracing::{debug, error};

use crate::http::request::{Method, Request};
use crate::http::response::{Response, ResponseBuilder, StatusCode};
use crate::storage::{FileStore, StorageError};

const ECHO_PREFIX: &str = "/echo/";
const FILES_PREFIX: &str = "/files/";

/// Every route resolves to one of these.
#[derive(Debug, Clone)]
pub enum Handler {
    /// `/` - always 200 with an empty body
    Root,
    /// `/user-agent` - echoes the User-Agent header
    UserAgent,
    /// `/echo/<value>` - echoes the path segment verbatim
    Echo,
    /// `/files/<name>` - read, write and delete entries in a store
    Files(Arc<dyn FileStore>),
}

impl Handler {
    pub async fn handle(&self, req: &Request) -> Response {
        match self {
            Handler::Root => Response::ok(Vec::new()),
            Handler::UserAgent => user_agent(req),
            Handler::Echo => echo(req),
            Handler::Files(store) => files(store.as_ref(), req).await,
        }
    }
}

fn text(body: impl Into<Vec<u8>>) -> Response {
    ResponseBuilder::new(StatusCode::Ok)
        .header("Content-Type", "text/plain")
        .body(body)
        .build()
}

fn user_agent(req: &Request) -> Response {
    text(req.header("user-agent").unwrap_or_default())
}

fn echo(req: &Request) -> Response {
    if req.method != Method::GET {
        return Response::method_not_allowed();
    }

    match req.path.strip_prefix(ECHO_PREFIX) {
        Some(value) if !value.is_empty() => text(value),
        _ => Response::not_found(),
    }
}

async fn files(store: &dyn FileStore, req: &Request) -> Response {
    let Some(name) = req.path.strip_prefix(FILES_PREFIX).filter(|n| !n.is_empty()) else {
        return Response::not_found();
    };

    match req.method {
        Method::GET => match store.read(name).await {
            Ok(data) => ResponseBuilder::new(StatusCode::Ok)
                .header("Content-Type", "application/octet-stream")
                .body(data)
                .build(),
            Err(e) => storage_failure(name, "read", e),
        },
        Method::POST => match store.write(name, &req.body).await {
            Ok(()) => Response::created(),
            Err(e) => storage_failure(name, "write", e),
        },
        Method::DELETE => match store.delete(name).await {
            Ok(()) => Response::ok(Vec::new()),
            Err(e) => storage_failure(name, "delete", e),
        },
        _ => Response::method_not_allowed(),
    }
}

fn storage_failure(name: &str, op: &'static str, err: StorageError) -> Response {
    match err {
        StorageError::NotFound => Response::not_found(),
        StorageError::InvalidName(_) => {
            debug!(name, op, "rejected file name");
            Response::bad_request()
        }
        StorageError::Io(e) => {
            error!(name, op, error = %e, "file store operation failed");
            Response::internal_error()
        }
    }
}
