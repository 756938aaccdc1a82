use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::config::Config;
use crate::http::connection::Connection;
use crate::routing::Router;
use crate::storage::DirectoryStore;

/// Builds the route table and serves connections until the listener fails.
pub async fn run(cfg: &Config) -> anyhow::Result<()> {
    let store = DirectoryStore::open(&cfg.files_dir).await?;
    info!("Serving files from {}", store.root().display());

    let router = Arc::new(Router::with_defaults(Arc::new(store))?);
    let listener = TcpListener::bind(&cfg.listen_addr).await?;
    info!("Listening on {}", cfg.listen_addr);

    serve(listener, router, cfg.read_timeout()).await
}

/// Accept loop. Each connection gets its own task sharing `router`.
/// Accept failures are logged and skipped; the loop only ends with the task.
pub async fn serve(
    listener: TcpListener,
    router: Arc<Router>,
    read_timeout: std::time::Duration,
) -> anyhow::Result<()> {
    loop {
        let (socket, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                warn!(error = %e, "Failed to accept connection");
                continue;
            }
        };
        info!("Accepted connection from {}", peer);

        let router = Arc::clone(&router);
        tokio::spawn(async move {
            let mut conn = Connection::new(socket, router, read_timeout);
            if let Err(e) = conn.run().await {
                tracing::error!("Connection error from {}: {}", peer, e);
            }
        });
    }
}
