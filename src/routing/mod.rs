//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Configuration phase:
//!     Router / Group (enrolled middleware stack)
//!     → router.rs (snapshot stack ++ local, compose once)
//!     → "<METHOD> <PATH>" key
//!     → mux.rs (parse key, insert into per-method radix tree)
//!
//! Serving phase:
//!     Request (method, path)
//!     → RouterService (Arc<Mux>, read-only)
//!     → mux.rs lookup → composed handler | 405 | 404
//! ```
//!
//! # Design Decisions
//! - All groups derived from one root register into the same multiplexer
//! - Routes are composed at registration, immutable at runtime
//! - Duplicate keys are reported by the multiplexer, never silently replaced

mod error;
mod key;
mod mux;
mod router;

pub use error::RouteError;
pub use key::RouteKey;
pub use mux::Mux;
pub use router::{Group, Router, RouterService};
