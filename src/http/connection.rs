use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio::time::timeout;
use tracing::debug;

use crate::error::ProtocolError;
use crate::http::compression;
use crate::http::parser::parse_request;
use crate::http::request::Request;
use crate::http::response::Response;
use crate::http::stream::StreamReader;
use crate::http::writer::ResponseWriter;
use crate::routing::Router;

pub struct Connection<S> {
    reader: StreamReader<S>,
    router: Arc<Router>,
    read_timeout: Duration,
    state: ConnectionState,
}

#[derive(Debug)]
pub enum ConnectionState {
    AwaitingRequest,
    Dispatching(Request),
    Responding(ResponseWriter, bool), // bool = close after writing?
    Closed,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, router: Arc<Router>, read_timeout: Duration) -> Self {
        Self {
            reader: StreamReader::new(stream),
            router,
            read_timeout,
            state: ConnectionState::AwaitingRequest,
        }
    }

    /// Serves requests until the client closes, asks to close, sends
    /// something unparseable, idles past the read timeout, or hits a
    /// route miss.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            let state = std::mem::replace(&mut self.state, ConnectionState::Closed);

            self.state = match state {
                ConnectionState::AwaitingRequest => match self.read_request().await {
                    Some(req) => ConnectionState::Dispatching(req),
                    None => ConnectionState::Closed,
                },

                ConnectionState::Dispatching(req) => self.dispatch(req).await,

                ConnectionState::Responding(mut writer, close) => {
                    writer.write_to_stream(self.reader.get_mut()).await?;

                    if close {
                        ConnectionState::Closed
                    } else {
                        ConnectionState::AwaitingRequest
                    }
                }

                ConnectionState::Closed => break,
            };
        }

        if let Err(e) = self.reader.get_mut().shutdown().await {
            debug!(error = %e, "shutdown failed");
        }
        Ok(())
    }

    /// Waits for the next request. `None` means the connection should be
    /// closed without a response.
    async fn read_request(&mut self) -> Option<Request> {
        let result = match timeout(self.read_timeout, parse_request(&mut self.reader)).await {
            Ok(result) => result,
            Err(_) => Err(ProtocolError::Timeout),
        };

        match result {
            Ok(req) => Some(req),
            Err(ProtocolError::ConnectionClosed) => {
                debug!("client closed connection");
                None
            }
            Err(e) => {
                debug!(error = %e, "failed to read request");
                None
            }
        }
    }

    async fn dispatch(&self, req: Request) -> ConnectionState {
        let Some(handler) = self.router.resolve(&req.path) else {
            debug!(method = %req.method, path = %req.path, "no route");
            return ConnectionState::Responding(ResponseWriter::new(Response::not_found(), true), true);
        };

        let mut response = handler.handle(&req).await;
        compression::negotiate(&req.headers, &mut response);

        debug!(
            method = %req.method,
            path = %req.path,
            status = response.status.as_u16(),
            "request handled"
        );

        let close = req.wants_close();
        ConnectionState::Responding(ResponseWriter::new(response, close), close)
    }
}
