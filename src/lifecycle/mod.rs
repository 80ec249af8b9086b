//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Parse args → load config → init logging → report warnings → bind → banner
//!
//! Signals (signals.rs):
//!     SIGINT / SIGTERM → first one wins
//!
//! Shutdown (shutdown.rs):
//!     Signal received → broadcast → accept loop stops → main returns
//! ```
//!
//! # Design Decisions
//! - Shutdown never interrupts a connection being served
//! - A second signal is not special; the in-flight connection is bounded by timeouts

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
