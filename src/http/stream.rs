use bytes::{Buf, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::error::ProtocolError;

const BUFFER_SIZE: usize = 4096;

/// Upper bound for a single request or header line.
pub const MAX_LINE_LEN: usize = 64 * 1024;

/// Buffered reader over a connection.
///
/// Bytes read past the end of one request stay in the buffer and are used
/// for the next one, so keep-alive clients may send back-to-back requests.
pub struct StreamReader<S> {
    stream: S,
    buffer: BytesMut,
}

impl<S> StreamReader<S>
where
    S: AsyncRead + Unpin,
{
    pub fn new(stream: S) -> Self {
        Self {
            stream,
            buffer: BytesMut::with_capacity(BUFFER_SIZE),
        }
    }

    /// Reads the next line, with its `\n` or `\r\n` terminator stripped.
    ///
    /// Returns [`ProtocolError::ConnectionClosed`] when the peer closes the
    /// stream before sending anything.
    pub async fn read_line(&mut self) -> Result<String, ProtocolError> {
        loop {
            if let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') {
                let mut line = self.buffer.split_to(pos + 1);
                line.truncate(pos);
                if line.last() == Some(&b'\r') {
                    line.truncate(pos - 1);
                }
                return Ok(String::from_utf8_lossy(&line).into_owned());
            }

            if self.buffer.len() > MAX_LINE_LEN {
                return Err(ProtocolError::LineTooLong { limit: MAX_LINE_LEN });
            }

            let n = self.stream.read_buf(&mut self.buffer).await?;
            if n == 0 {
                if self.buffer.is_empty() {
                    return Err(ProtocolError::ConnectionClosed);
                }
                return Err(std::io::Error::from(std::io::ErrorKind::UnexpectedEof).into());
            }
        }
    }

    /// Reads exactly `len` bytes, draining buffered data first.
    pub async fn read_exact(&mut self, len: usize) -> Result<Vec<u8>, ProtocolError> {
        // `len` is client-controlled; capacity grows only as bytes arrive.
        let mut out = Vec::with_capacity(len.min(BUFFER_SIZE));

        let from_buffer = self.buffer.len().min(len);
        out.extend_from_slice(&self.buffer[..from_buffer]);
        self.buffer.advance(from_buffer);

        while out.len() < len {
            // A read error mid-body is reported the same way as a short body.
            let n = self.stream.read_buf(&mut self.buffer).await.unwrap_or(0);
            if n == 0 {
                return Err(ProtocolError::IncompleteBody {
                    expected: len,
                    received: out.len(),
                });
            }

            let take = self.buffer.len().min(len - out.len());
            out.extend_from_slice(&self.buffer[..take]);
            self.buffer.advance(take);
        }

        Ok(out)
    }

    pub fn get_mut(&mut self) -> &mut S {
        &mut self.stream
    }
}
