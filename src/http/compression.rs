//! Response body content negotiation.
//!
//! Only gzip is supported. A request opts in with any `Accept-Encoding`
//! value containing `gzip`; quality values are not interpreted.

use std::collections::HashMap;
use std::io::{self, Write};

use flate2::Compression;
use flate2::write::GzEncoder;
use tracing::warn;

use crate::http::response::{Response, StatusCode};

pub const GZIP: &str = "gzip";

/// Returns true if the request headers accept a gzip-encoded body.
pub fn accepts_gzip(request_headers: &HashMap<String, String>) -> bool {
    request_headers
        .get("accept-encoding")
        .is_some_and(|v| v.contains(GZIP))
}

pub fn gzip(data: &[u8]) -> io::Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::with_capacity(data.len() / 2 + 32), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}

/// Encodes the response body in place when the client accepts gzip.
///
/// `201 Created` answers to uploads are never negotiated. Every other
/// response is encoded, including empty bodies. If encoding fails the
/// identity body is sent instead.
pub fn negotiate(request_headers: &HashMap<String, String>, response: &mut Response) {
    if response.status == StatusCode::Created || !accepts_gzip(request_headers) {
        return;
    }

    match gzip(&response.body) {
        Ok(encoded) => {
            response.body = encoded;
            response.set_header("Content-Encoding", GZIP);
        }
        Err(e) => {
            warn!(error = %e, "gzip encoding failed, sending identity body");
        }
    }
}
