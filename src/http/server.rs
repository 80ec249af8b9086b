//! HTTP server accept loop.
//!
//! # Responsibilities
//! - Accept connections one at a time
//! - Parse the request line and dispatch to the router
//! - Write the response, close, and log the outcome
//! - Stop accepting when shutdown is signalled
//!
//! # Design Decisions
//! - Strictly sequential: a connection is closed before the next accept
//! - Parse and I/O failures close the socket without a response
//! - Shutdown is only observed between connections

use std::time::{Duration, Instant};

use tokio::sync::broadcast;

use crate::config::{ServerConfig, TimeoutConfig};
use crate::http::request::RequestError;
use crate::net::{Connection, ConnectionError, Listener};
use crate::routing::{AppInfo, Router};

/// Pause after a failed accept so resource exhaustion does not spin the loop.
const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

/// Single-threaded HTTP server.
pub struct HttpServer {
    info: AppInfo,
    timeouts: TimeoutConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: &ServerConfig) -> Self {
        Self {
            info: AppInfo::from_config(config),
            timeouts: config.timeouts.clone(),
        }
    }

    /// Run the accept loop until `shutdown` fires.
    pub async fn run(self, listener: Listener, mut shutdown: broadcast::Receiver<()>) -> std::io::Result<()> {
        let addr = listener.local_addr();
        let router = Router::new(AppInfo {
            port: addr.port(),
            ..self.info
        });

        tracing::info!(
            address = %addr,
            routes = ?router.paths().collect::<Vec<_>>(),
            "HTTP server starting"
        );

        loop {
            tokio::select! {
                biased;

                _ = shutdown.recv() => {
                    tracing::info!("Shutdown signal received");
                    break;
                }

                accepted = listener.accept() => match accepted {
                    Ok(connection) => serve(connection, &router, &self.timeouts).await,
                    Err(e) => {
                        tracing::warn!(error = %e, "Accept failed");
                        tokio::time::sleep(ACCEPT_BACKOFF).await;
                    }
                },
            }
        }

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Handle one connection from first byte to close.
async fn serve(mut connection: Connection, router: &Router, timeouts: &TimeoutConfig) {
    let start = Instant::now();
    let connection_id = connection.id();
    let peer_addr = connection.peer_addr();

    let request = match connection.read_request_line(timeouts.read()).await {
        Ok(request) => request,
        Err(ConnectionError::Request(RequestError::Empty)) => {
            tracing::debug!(connection_id = %connection_id, peer_addr = %peer_addr, "Peer closed without a request");
            connection.close().await;
            return;
        }
        Err(e) => {
            tracing::warn!(
                connection_id = %connection_id,
                peer_addr = %peer_addr,
                error = %e,
                "Dropping connection"
            );
            connection.close().await;
            return;
        }
    };

    let response = router.dispatch(&request);

    match connection.write_response(&response, timeouts.write()).await {
        Ok(written) => tracing::info!(
            connection_id = %connection_id,
            peer_addr = %peer_addr,
            method = %request.method,
            path = %request.path(),
            status = response.status().as_u16(),
            bytes = written,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Request served"
        ),
        Err(e) => tracing::warn!(
            connection_id = %connection_id,
            method = %request.method,
            path = %request.path(),
            error = %e,
            "Failed to write response"
        ),
    }

    connection.close().await;
}
