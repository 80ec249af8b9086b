//! TCP listener.
//!
//! # Responsibilities
//! - Bind to the configured host and port
//! - Accept incoming TCP connections
//! - Report the address actually bound (port 0 resolves here)

use std::net::SocketAddr;
use tokio::net::TcpListener;

use crate::config::ListenerConfig;
use crate::net::connection::Connection;

/// Error type for listener operations.
#[derive(Debug)]
pub enum ListenerError {
    /// Failed to resolve or bind the address.
    Bind(String, std::io::Error),
    /// Failed to accept connection.
    Accept(std::io::Error),
}

impl std::fmt::Display for ListenerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListenerError::Bind(addr, e) => write!(f, "Failed to bind {}: {}", addr, e),
            ListenerError::Accept(e) => write!(f, "Failed to accept: {}", e),
        }
    }
}

impl std::error::Error for ListenerError {}

/// A TCP listener handing out one [`Connection`] per accept.
#[derive(Debug)]
pub struct Listener {
    inner: TcpListener,
    local_addr: SocketAddr,
}

impl Listener {
    /// Bind to the configured address. Host names are resolved by the OS.
    pub async fn bind(config: &ListenerConfig) -> Result<Self, ListenerError> {
        let address = config.bind_address();
        let inner = TcpListener::bind(&address)
            .await
            .map_err(|e| ListenerError::Bind(address.clone(), e))?;
        let local_addr = inner
            .local_addr()
            .map_err(|e| ListenerError::Bind(address, e))?;

        tracing::debug!(address = %local_addr, "Listener bound");

        Ok(Self { inner, local_addr })
    }

    /// Wait for the next connection.
    pub async fn accept(&self) -> Result<Connection, ListenerError> {
        let (stream, peer_addr) = self.inner.accept().await.map_err(ListenerError::Accept)?;
        let connection = Connection::new(stream, peer_addr);

        tracing::debug!(
            connection_id = %connection.id(),
            peer_addr = %peer_addr,
            "Connection accepted"
        );

        Ok(connection)
    }

    /// Get the local address this listener is bound to.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn port_zero_resolves_to_real_port() {
        let config = ListenerConfig {
            host: "127.0.0.1".into(),
            port: 0,
        };
        let listener = Listener::bind(&config).await.unwrap();
        assert_ne!(listener.local_addr().port(), 0);
        assert!(listener.local_addr().ip().is_loopback());
    }

    #[tokio::test]
    async fn bind_conflict_is_reported() {
        let first = Listener::bind(&ListenerConfig {
            host: "127.0.0.1".into(),
            port: 0,
        })
        .await
        .unwrap();
        let taken = ListenerConfig {
            host: "127.0.0.1".into(),
            port: first.local_addr().port(),
        };
        let err = Listener::bind(&taken).await.unwrap_err();
        assert!(matches!(err, ListenerError::Bind(..)));
        assert!(err.to_string().contains(&taken.bind_address()));
    }

    #[tokio::test]
    async fn bad_host_is_bind_error() {
        let config = ListenerConfig {
            host: "not a host".into(),
            port: 0,
        };
        assert!(matches!(Listener::bind(&config).await, Err(ListenerError::Bind(..))));
    }
}
