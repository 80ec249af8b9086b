//! Request-line parsing.
//!
//! # Responsibilities
//! - Parse `METHOD SP TARGET [SP VERSION]`
//! - Split the path from the query string for routing
//!
//! # Design Decisions
//! - Headers and body are never looked at
//! - Method is recorded for logging only; it does not affect dispatch
//! - The line terminator is optional: EOF ends the line just as well
//! - The version may be omitted (HTTP/0.9 style); when present it must be `HTTP/x.y`

use thiserror::Error;

/// Upper bound on the request line, terminator included.
pub const MAX_REQUEST_LINE: usize = 8 * 1024;

/// Errors produced while parsing a request line.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequestError {
    /// Client closed the connection before sending anything.
    #[error("empty request")]
    Empty,

    /// Size limit reached before a line terminator.
    #[error("request line not terminated within {0} bytes")]
    Unterminated(usize),

    /// Line did not have two or three whitespace-separated parts.
    #[error("malformed request line: {0:?}")]
    Malformed(String),

    #[error("invalid method token: {0:?}")]
    InvalidMethod(String),

    #[error("invalid request target: {0:?}")]
    InvalidTarget(String),

    #[error("unsupported protocol version: {0:?}")]
    InvalidVersion(String),
}

/// HTTP method.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
    Connect,
    Trace,
    /// Any other syntactically valid token.
    Extension(String),
}

impl Method {
    /// Parse a method token. Methods are case-sensitive.
    pub fn parse(token: &str) -> Result<Self, RequestError> {
        let method = match token {
            "GET" => Method::Get,
            "POST" => Method::Post,
            "PUT" => Method::Put,
            "DELETE" => Method::Delete,
            "PATCH" => Method::Patch,
            "HEAD" => Method::Head,
            "OPTIONS" => Method::Options,
            "CONNECT" => Method::Connect,
            "TRACE" => Method::Trace,
            other if is_token(other) => Method::Extension(other.to_string()),
            other => return Err(RequestError::InvalidMethod(other.to_string())),
        };
        Ok(method)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
            Method::Patch => "PATCH",
            Method::Head => "HEAD",
            Method::Options => "OPTIONS",
            Method::Connect => "CONNECT",
            Method::Trace => "TRACE",
            Method::Extension(s) => s,
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// RFC 9110 tchar
fn is_token(s: &str) -> bool {
    !s.is_empty()
        && s.bytes().all(|b| {
            b.is_ascii_alphanumeric()
                || matches!(
                    b,
                    b'!' | b'#' | b'$' | b'%' | b'&' | b'\'' | b'*' | b'+' | b'-' | b'.' | b'^' | b'_' | b'`' | b'|' | b'~'
                )
        })
}

/// The parsed first line of a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLine {
    pub method: Method,
    /// Request target as sent, query included.
    pub target: String,
    /// Protocol version, absent for a bare `METHOD TARGET` line.
    pub version: Option<String>,
}

impl RequestLine {
    /// Parse a single line as read from the socket, with or without its
    /// `\n` / `\r\n` terminator.
    pub fn parse(line: &str) -> Result<Self, RequestError> {
        if line.is_empty() {
            return Err(RequestError::Empty);
        }
        let line = line.strip_suffix('\n').unwrap_or(line);
        let line = line.strip_suffix('\r').unwrap_or(line);

        let mut parts = line.split_ascii_whitespace();
        let (method, target, version) = match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(m), Some(t), v, None) => (m, t, v),
            _ => return Err(RequestError::Malformed(line.to_string())),
        };

        let method = Method::parse(method)?;

        if !target.starts_with('/') {
            return Err(RequestError::InvalidTarget(target.to_string()));
        }

        if let Some(v) = version.filter(|v| !is_http_version(v)) {
            return Err(RequestError::InvalidVersion(v.to_string()));
        }

        Ok(Self {
            method,
            target: target.to_string(),
            version: version.map(str::to_string),
        })
    }

    /// Path component of the target, without the query string.
    pub fn path(&self) -> &str {
        match self.target.split_once('?') {
            Some((path, _)) => path,
            None => &self.target,
        }
    }
}

fn is_http_version(v: &str) -> bool {
    let Some(rest) = v.strip_prefix("HTTP/") else {
        return false;
    };
    let bytes = rest.as_bytes();
    bytes.len() == 3 && bytes[0].is_ascii_digit() && bytes[1] == b'.' && bytes[2].is_ascii_digit()
}
