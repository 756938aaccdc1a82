//! Error types shared across the server.
//!
//! Connection-level failures are [`ProtocolError`]s: the connection is
//! dropped without a response. Everything a client can observe is a status
//! code produced by a handler instead.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("malformed request line: {0:?}")]
    MalformedRequestLine(String),

    #[error("invalid content-length: {0:?}")]
    InvalidContentLength(String),

    #[error("incomplete body: expected {expected} bytes, received {received}")]
    IncompleteBody { expected: usize, received: usize },

    #[error("line exceeds {limit} bytes")]
    LineTooLong { limit: usize },

    #[error("connection closed by peer")]
    ConnectionClosed,

    #[error("timed out waiting for request")]
    Timeout,

    #[error(transparent)]
    Io(#[from] io::Error),
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("entry not found")]
    NotFound,

    #[error("invalid entry name: {0:?}")]
    InvalidName(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}

#[derive(Debug, Error)]
#[error("invalid route pattern {pattern:?}: {source}")]
pub struct RouteError {
    pub pattern: String,
    #[source]
    pub source: regex::Error,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}
