use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::http::response::Response;

const HTTP_VERSION: &str = "HTTP/1.1";

/// Fills in the headers the wire format needs.
///
/// `Content-Length` is only added when the handler did not set one, and
/// always measures the body as it will be sent (after compression).
pub fn finalize_headers(resp: &mut Response, close: bool) {
    if !resp.has_header("Content-Length") {
        let len = resp.body.len().to_string();
        resp.set_header("Content-Length", len);
    }

    resp.set_header("Connection", if close { "close" } else { "keep-alive" });
}

pub fn serialize_response(resp: &Response) -> Vec<u8> {
    let mut buf = Vec::with_capacity(128 + resp.body.len());

    // Status line
    let status_line = format!(
        "{} {} {}\r\n",
        HTTP_VERSION,
        resp.status.as_u16(),
        resp.status.reason_phrase()
    );
    buf.extend_from_slice(status_line.as_bytes());

    // Headers
    for (k, v) in &resp.headers {
        buf.extend_from_slice(k.as_bytes());
        buf.extend_from_slice(b": ");
        buf.extend_from_slice(v.as_bytes());
        buf.extend_from_slice(b"\r\n");
    }

    // Header/body separator
    buf.extend_from_slice(b"\r\n");

    // Body
    buf.extend_from_slice(&resp.body);

    buf
}

/// A serialized response, possibly partially written.
#[derive(Debug)]
pub struct ResponseWriter {
    buffer: Vec<u8>,
    written: usize,
}

impl ResponseWriter {
    pub fn new(mut response: Response, close: bool) -> Self {
        finalize_headers(&mut response, close);
        Self {
            buffer: serialize_response(&response),
            written: 0,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    pub async fn write_to_stream<W>(&mut self, stream: &mut W) -> anyhow::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        while self.written < self.buffer.len() {
            let n = stream.write(&self.buffer[self.written..]).await?;

            if n == 0 {
                return Err(anyhow::anyhow!("connection closed while writing"));
            }

            self.written += n;
        }

        stream.flush().await?;
        Ok(())
    }
}
