//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! optional config file (TOML)
//!     → loader.rs (read & deserialize)
//!     → ServerConfig
//!     → CLI flags override individual fields (cli.rs)
//!     → owned by main, immutable from then on
//! ```
//!
//! # Design Decisions
//! - All fields have defaults so an empty file (or no file) is valid
//! - No semantic validation; bad values surface when they are used

pub mod loader;
pub mod schema;

pub use loader::{load_config, ConfigError};
pub use schema::{AppConfig, ListenerConfig, LoggingConfig, ServerConfig, TimeoutConfig};
