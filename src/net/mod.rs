//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming TCP connection
//!     → listener.rs (bind, accept)
//!     → connection.rs (read request line, write response, close)
//!     → Hand back to the accept loop
//!
//! Connection lifetime:
//!     Accepted → Reading → Writing → Closed
//! ```
//!
//! # Design Decisions
//! - One connection at a time; the next accept waits for the close
//! - Every phase is bounded by a timeout so a stalled peer cannot wedge the loop
//! - No keep-alive: one request per connection

pub mod connection;
pub mod listener;

pub use connection::{Connection, ConnectionError, ConnectionId};
pub use listener::{Listener, ListenerError};
