//! Startup reporting.
//!
//! # Responsibilities
//! - Report command-line warnings once logging is up
//! - Print the effective configuration, with the port actually bound
//!
//! # Design Decisions
//! - Absent labels print as `Not provided`
//! - Reporting happens after bind so port 0 shows the real port

use std::net::SocketAddr;

use crate::cli::ArgWarning;
use crate::config::ServerConfig;

pub const NOT_PROVIDED: &str = "Not provided";

/// The startup printout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub env: String,
    pub address: SocketAddr,
    pub telegram_url: String,
}

impl Banner {
    pub fn new(config: &ServerConfig, address: SocketAddr) -> Self {
        Self {
            env: config.app.env.clone().unwrap_or_else(|| NOT_PROVIDED.to_string()),
            address,
            telegram_url: config
                .app
                .telegram_url
                .clone()
                .unwrap_or_else(|| NOT_PROVIDED.to_string()),
        }
    }
}

impl std::fmt::Display for Banner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Env: {}, Port: {}, Telegram URL: {}",
            self.env,
            self.address.port(),
            self.telegram_url
        )
    }
}

/// Log each command-line warning.
pub fn report_warnings(warnings: &[ArgWarning]) {
    for warning in warnings {
        tracing::warn!("{}", warning);
    }
}

/// Log the startup banner.
pub fn report_banner(banner: &Banner) {
    tracing::info!(
        env = %banner.env,
        port = banner.address.port(),
        address = %banner.address,
        telegram_url = %banner.telegram_url,
        "doyoque v{} listening. {}",
        env!("CARGO_PKG_VERSION"),
        banner
    );
}
