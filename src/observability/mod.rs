//! Observability subsystem.
//!
//! Console logging only: structured `tracing` events rendered by the
//! `tracing-subscriber` fmt layer. Connection IDs appear as a field on every
//! per-connection event.

pub mod logging;

pub use logging::init_logging;
