//! doyoque: a minimal single-threaded HTTP server.
//!
//! # Architecture Overview
//!
//! ```text
//!   Client                ┌──────────────────────────────────────────────┐
//!   ─────────────────────▶│ net::listener → net::connection              │
//!                         │        │  (one connection at a time)          │
//!                         │        ▼                                      │
//!                         │ http::request (request line only)             │
//!                         │        │                                      │
//!                         │        ▼                                      │
//!                         │ routing::router → routing::handlers           │
//!                         │        │  (/hello, /info, /doyoque, 404)      │
//!                         │        ▼                                      │
//!   ◀─────────────────────│ http::response (+ http::json)                 │
//!                         └──────────────────────────────────────────────┘
//! ```
//!
//! Configuration comes from `--flag=value` arguments, optionally layered on a
//! TOML file. SIGINT/SIGTERM stop the accept loop.

use doyoque::cli::Cli;
use doyoque::lifecycle::startup::{report_banner, report_warnings, Banner};
use doyoque::net::Listener;
use doyoque::observability::init_logging;
use doyoque::{HttpServer, Shutdown};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (cli, warnings) = Cli::parse_lenient(std::env::args_os());
    let config = cli.into_config()?;

    init_logging(&config.logging.level).map_err(|e| e as Box<dyn std::error::Error>)?;
    report_warnings(&warnings);

    let listener = Listener::bind(&config.listener).await?;
    report_banner(&Banner::new(&config, listener.local_addr()));

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    shutdown.trigger_on_signal();

    HttpServer::new(&config).run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
