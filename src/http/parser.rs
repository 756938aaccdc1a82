use std::collections::HashMap;

use tokio::io::AsyncRead;

use crate::error::ProtocolError;
use crate::http::request::{Method, Request};
use crate::http::stream::StreamReader;

/// Reads one request off the stream.
///
/// Stream errors (EOF, I/O failure) are returned unchanged so the caller can
/// tell a closed connection from a malformed request.
pub async fn parse_request<S>(reader: &mut StreamReader<S>) -> Result<Request, ProtocolError>
where
    S: AsyncRead + Unpin,
{
    // Request line
    let request_line = reader.read_line().await?;
    let mut parts = request_line.split_whitespace();

    let (Some(method), Some(path), Some(version)) = (parts.next(), parts.next(), parts.next())
    else {
        return Err(ProtocolError::MalformedRequestLine(request_line));
    };

    let method = Method::from_token(method);
    let path = path.to_string();
    let version = version.to_string();

    // Headers
    let mut headers = HashMap::new();
    loop {
        let line = reader.read_line().await?;
        if line.is_empty() {
            break;
        }

        // Lines without a colon are skipped
        if let Some((key, value)) = line.split_once(':') {
            headers.insert(key.trim().to_ascii_lowercase(), value.trim().to_string());
        }
    }

    // Body
    let body = match headers.get("content-length") {
        Some(raw) => {
            let len = raw
                .parse::<usize>()
                .map_err(|_| ProtocolError::InvalidContentLength(raw.clone()))?;
            reader.read_exact(len).await?
        }
        None => Vec::new(),
    };

    Ok(Request {
        method,
        path,
        version,
        headers,
        body,
    })
}
