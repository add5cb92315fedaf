//! Method- and path-aware HTTP router with composable middleware.
//!
//! Handlers are registered under `(method, path)` and wrapped, once, by the
//! middleware enrolled at the moment of registration. Groups extend the
//! middleware stack for the routes registered inside them while sharing one
//! dispatch table with their parent.
//!
//! ```
//! use gor::http::{Handler, Request};
//! use gor::{Middleware, Router};
//!
//! let logger = Middleware::from_fn(|req: Request, next: Handler| async move {
//!     tracing::info!(path = %req.uri().path(), "request");
//!     next.run(req).await
//! });
//!
//! let mut router = Router::with_middleware([logger]);
//! router.get("/", Handler::new(|_req: Request| async { "home" }), &[])?;
//! router.group(|api| {
//!     api.use_middleware([Middleware::from_fn(|req: Request, next: Handler| async move {
//!         next.run(req).await
//!     })]);
//!     api.post("/api/items", Handler::new(|_req: Request| async { "created" }), &[])
//! })?;
//! # Ok::<(), gor::RouteError>(())
//! ```

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod middleware;
pub mod observability;
pub mod routing;

pub use config::ServerConfig;
pub use http::{Handler, HttpServer, Request, Response};
pub use lifecycle::Shutdown;
pub use middleware::Middleware;
pub use routing::{Group, RouteError, RouteKey, Router, RouterService};
