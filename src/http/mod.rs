//! HTTP-facing types shared by every subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (axum::serve, trace + timeout layers)
//!     → routing::RouterService (multiplexer lookup)
//!     → request.rs (path parameters attached as an extension)
//!     → handler.rs (pre-composed middleware chain + terminal handler)
//!     → Response
//! ```
//!
//! # Design Decisions
//! - Request and response types are axum's, so any axum/tower code interoperates
//! - Handlers are reference-counted closures: cloning one never clones its state
//! - A handler is also a `tower::Service`, which lets tower layers wrap it

pub mod handler;
pub mod request;
pub mod server;

pub use handler::Handler;
pub use request::{PathParams, PathParamsExt};
pub use server::HttpServer;

/// Request type seen by handlers and middleware.
pub type Request = axum::extract::Request;

/// Response type produced by handlers and middleware.
pub type Response = axum::response::Response;
