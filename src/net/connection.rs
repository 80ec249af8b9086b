//! Per-connection request handling.
//!
//! # Responsibilities
//! - Assign a connection ID for tracing
//! - Read exactly one request line, bounded in size and time
//! - Write one response and close
//!
//! # Design Decisions
//! - Bytes after the request line (headers, body) are read but never inspected
//! - After writing, the write half is shut down and remaining input drained
//!   for a short while so the peer sees a FIN rather than a reset

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::time::timeout;

use crate::http::request::{RequestError, RequestLine, MAX_REQUEST_LINE};
use crate::http::response::Response;

/// Only uniqueness matters, so relaxed ordering is enough.
static CONNECTION_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// How long to keep reading after the response has been sent.
const LINGER: Duration = Duration::from_millis(250);

/// Unique identifier for a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(u64);

impl ConnectionId {
    /// Generate a new unique connection ID.
    pub fn new() -> Self {
        Self(CONNECTION_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}

/// Errors that end a connection without a response.
#[derive(Debug, Error)]
pub enum ConnectionError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("timed out {phase} after {after:?}")]
    Timeout { phase: &'static str, after: Duration },

    #[error(transparent)]
    Request(#[from] RequestError),
}

/// An accepted client connection.
#[derive(Debug)]
pub struct Connection {
    id: ConnectionId,
    peer_addr: SocketAddr,
    stream: TcpStream,
}

impl Connection {
    pub fn new(stream: TcpStream, peer_addr: SocketAddr) -> Self {
        Self {
            id: ConnectionId::new(),
            peer_addr,
            stream,
        }
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    pub fn peer_addr(&self) -> SocketAddr {
        self.peer_addr
    }

    /// Read and parse the first line of the request.
    pub async fn read_request_line(&mut self, limit: Duration) -> Result<RequestLine, ConnectionError> {
        let mut reader = BufReader::new((&mut self.stream).take(MAX_REQUEST_LINE as u64));
        let mut line = String::new();

        timeout(limit, reader.read_line(&mut line))
            .await
            .map_err(|_| ConnectionError::Timeout {
                phase: "reading request line",
                after: limit,
            })??;

        // EOF before a terminator still ends the line; only the size cap does not.
        if !line.ends_with('\n') && line.len() >= MAX_REQUEST_LINE {
            return Err(RequestError::Unterminated(MAX_REQUEST_LINE).into());
        }

        Ok(RequestLine::parse(&line)?)
    }

    /// Write the full response and half-close the socket. Returns bytes written.
    pub async fn write_response(&mut self, response: &Response, limit: Duration) -> Result<usize, ConnectionError> {
        let bytes = response.to_bytes();
        let written = bytes.len();
        let stream = &mut self.stream;

        timeout(limit, async move {
            stream.write_all(&bytes).await?;
            stream.flush().await?;
            stream.shutdown().await
        })
        .await
        .map_err(|_| ConnectionError::Timeout {
            phase: "writing response",
            after: limit,
        })??;

        Ok(written)
    }

    /// Discard unread input until the peer closes or the linger period ends.
    pub async fn close(mut self) {
        let mut scratch = [0u8; 1024];
        let drain = async {
            loop {
                match self.stream.read(&mut scratch).await {
                    Ok(0) | Err(_) => break,
                    Ok(_) => continue,
                }
            }
        };
        if timeout(LINGER, drain).await.is_err() {
            tracing::trace!(connection_id = %self.id, "Linger period elapsed");
        }
        tracing::trace!(connection_id = %self.id, "Connection closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::request::Method;
    use crate::http::response::StatusCode;
    use tokio::net::TcpListener;

    async fn pair() -> (Connection, TcpStream) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let client = TcpStream::connect(addr).await.unwrap();
        let (server, peer) = listener.accept().await.unwrap();
        (Connection::new(server, peer), client)
    }

    #[test]
    fn connection_id_unique() {
        let id1 = ConnectionId::new();
        let id2 = ConnectionId::new();
        assert_ne!(id1, id2);
        assert!(id2.as_u64() > id1.as_u64());
        assert!(id1.to_string().starts_with("conn-"));
    }

    #[tokio::test]
    async fn reads_request_line_split_across_writes() {
        let (mut conn, mut client) = pair().await;
        client.write_all(b"GET /hel").await.unwrap();
        let writer = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            client.write_all(b"lo HTTP/1.1\r\nHost: x\r\n\r\n").await.unwrap();
            client
        });

        let line = conn.read_request_line(Duration::from_secs(2)).await.unwrap();
        assert_eq!(line.method, Method::Get);
        assert_eq!(line.path(), "/hello");
        drop(writer.await.unwrap());
    }

    #[tokio::test]
    async fn empty_connection_is_reported() {
        let (mut conn, client) = pair().await;
        drop(client);
        let err = conn.read_request_line(Duration::from_secs(2)).await.unwrap_err();
        assert!(matches!(err, ConnectionError::Request(RequestError::Empty)));
    }

    #[tokio::test]
    async fn silent_client_times_out() {
        let (mut conn, _client) = pair().await;
        let err = conn.read_request_line(Duration::from_millis(50)).await.unwrap_err();
        assert!(matches!(err, ConnectionError::Timeout { .. }));
    }

    #[tokio::test]
    async fn line_ended_by_eof_is_parsed() {
        let (mut conn, mut client) = pair().await;
        client.write_all(b"GET /hello HTTP/1.1").await.unwrap();
        client.shutdown().await.unwrap();

        let line = conn.read_request_line(Duration::from_secs(2)).await.unwrap();
        assert_eq!(line.path(), "/hello");
    }

    #[tokio::test]
    async fn oversized_line_is_rejected() {
        let (mut conn, mut client) = pair().await;
        let long = format!("GET /{} HTTP/1.1\r\n", "a".repeat(MAX_REQUEST_LINE));
        let writer = tokio::spawn(async move {
            let _ = client.write_all(long.as_bytes()).await;
            client
        });
        let err = conn.read_request_line(Duration::from_secs(2)).await.unwrap_err();
        assert!(matches!(err, ConnectionError::Request(RequestError::Unterminated(_))));
        drop(writer.await.unwrap());
    }

    #[tokio::test]
    async fn response_is_written_then_eof() {
        let (mut conn, mut client) = pair().await;
        let response = Response::text(StatusCode::OK, "hi");
        let written = conn.write_response(&response, Duration::from_secs(2)).await.unwrap();
        assert_eq!(written, response.to_bytes().len());
        drop(client.shutdown().await);
        conn.close().await;

        let mut received = Vec::new();
        client.read_to_end(&mut received).await.unwrap();
        assert_eq!(received, response.to_bytes());
    }
}
