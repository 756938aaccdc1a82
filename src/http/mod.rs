//! HTTP protocol implementation.
//!
//! A small HTTP/1.1 subset with keep-alive connections: fixed-length bodies
//! only, no chunked transfer-encoding, gzip as the only content encoding.
//!
//! # Architecture
//!
//! - **`stream`**: buffered line and fixed-length reads over a connection
//! - **`parser`**: reads one request off a [`stream::StreamReader`]
//! - **`request`** / **`response`**: message types and builders
//! - **`compression`**: gzip negotiation from `Accept-Encoding`
//! - **`writer`**: fills in `Content-Length`/`Connection` and serializes
//! - **`connection`**: the per-connection state machine
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌──────────────────┐
//!        │ AwaitingRequest  │ ← read deadline armed
//!        └──────┬───────────┘
//!               │ Request parsed          (parse error / timeout / EOF → Closed)
//!               ▼
//!        ┌──────────────────┐
//!        │   Dispatching    │ ← route, handle, compress
//!        └──────┬───────────┘
//!               │ Response ready          (no route → 404, then Closed)
//!               ▼
//!        ┌──────────────────┐
//!        │    Responding    │ ← write to client
//!        └──────┬───────────┘
//!               ├─ Keep-Alive → AwaitingRequest (same connection)
//!               └─ Connection: close → Closed
//! ```

pub mod compression;
pub mod connection;
pub mod parser;
pub mod request;
pub mod response;
pub mod stream;
pub mod writer;
