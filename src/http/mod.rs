//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! Accepted TCP connection
//!     → server.rs (accept loop, one connection at a time)
//!     → request.rs (parse the request line only)
//!     → [routing layer picks the canned handler]
//!     → response.rs (status line + three headers + body)
//!     → json.rs (bodies of JSON routes)
//!     → Send to client, close
//! ```

pub mod json;
pub mod request;
pub mod response;
pub mod server;

pub use json::{JsonObject, JsonValue};
pub use request::{Method, RequestError, RequestLine};
pub use response::{ContentType, Response, StatusCode};
pub use server::HttpServer;
