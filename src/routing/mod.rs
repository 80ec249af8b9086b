//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Parsed request line (method, path)
//!     → router.rs (exact path lookup)
//!     → handlers.rs (build the canned response)
//!     → Response, or the 404 fallback
//! ```
//!
//! # Design Decisions
//! - Route set is fixed at compile time; no registration API
//! - Exact path match, case-sensitive, query string ignored
//! - Method never affects which handler runs

pub mod handlers;
pub mod router;

pub use handlers::AppInfo;
pub use router::{Route, Router};
