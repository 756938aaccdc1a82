//! tinyhttp - a small HTTP/1.1 server
//!
//! Core library for request parsing, routing, file storage and the
//! per-connection keep-alive loop.

pub mod config;
pub mod error;
pub mod http;
pub mod routing;
pub mod server;
pub mod storage;
