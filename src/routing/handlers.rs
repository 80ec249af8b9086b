//! Canned route handlers.

use crate::config::ServerConfig;
use crate::http::json::JsonObject;
use crate::http::response::{Response, StatusCode};

pub const SERVICE_NAME: &str = "doyoque";

/// Facts about the running process that handlers may report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppInfo {
    pub env: Option<String>,
    pub telegram_url: Option<String>,
    /// Port actually bound, which differs from the configured one when that was 0.
    pub port: u16,
}

impl AppInfo {
    pub fn from_config(config: &ServerConfig) -> Self {
        Self {
            env: config.app.env.clone(),
            telegram_url: config.app.telegram_url.clone(),
            port: config.listener.port,
        }
    }
}

pub fn hello(_info: &AppInfo) -> Response {
    Response::text(StatusCode::OK, "Hello, World!")
}

pub fn info(info: &AppInfo) -> Response {
    let body = JsonObject::new()
        .with("name", SERVICE_NAME)
        .with("version", env!("CARGO_PKG_VERSION"))
        .with("env", info.env.as_deref())
        .with("port", info.port)
        .with("telegram_configured", info.telegram_url.is_some());
    Response::json(StatusCode::OK, &body)
}

pub fn doyoque(_info: &AppInfo) -> Response {
    let body = JsonObject::new()
        .with("name", SERVICE_NAME)
        .with("message", "Do you o que?");
    Response::json(StatusCode::OK, &body)
}

pub fn not_found() -> Response {
    Response::text(StatusCode::NOT_FOUND, "Not Found")
}
