//! Middleware values and chain composition.
//!
//! # Data Flow
//! ```text
//! Registration time:
//!     enrolled stack [s1..sn] ++ local [l1..lm]
//!     → chain.rs (fold from last to first)
//!     → composed Handler = s1(s2(..sn(l1(..lm(H)))))
//!
//! Request time:
//!     composed Handler runs; no per-request composition
//! ```
//!
//! # Design Decisions
//! - A middleware is a function from handler to handler, applied once
//! - Outer layers observe the request first and the response last
//! - Any `tower::Layer` over `Handler` can be enrolled as middleware

mod chain;

pub use chain::compose;

use std::convert::Infallible;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use axum::response::IntoResponse;
use tower::{Layer, Service};

use crate::http::{Handler, Request};

type MiddlewareFn = dyn Fn(Handler) -> Handler + Send + Sync;

/// Transforms a handler into a handler that wraps it.
///
/// Clones share the same underlying function, so a middleware holding
/// state (a counter, a cache) keeps one copy of it however many stacks
/// it is enrolled in.
#[derive(Clone)]
pub struct Middleware {
    inner: Arc<MiddlewareFn>,
}

impl Middleware {
    /// Create a middleware from a handler transformer.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(Handler) -> Handler + Send + Sync + 'static,
    {
        Self { inner: Arc::new(f) }
    }

    /// Create a middleware from an async function receiving the request
    /// and the next handler.
    ///
    /// Returning without running `next` short-circuits the chain.
    ///
    /// ```
    /// use gor::http::{Handler, Request};
    /// use gor::Middleware;
    ///
    /// let passthrough = Middleware::from_fn(|req: Request, next: Handler| async move {
    ///     next.run(req).await
    /// });
    /// ```
    pub fn from_fn<F, Fut, R>(f: F) -> Self
    where
        F: Fn(Request, Handler) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = R> + Send + 'static,
        R: IntoResponse,
    {
        let f = Arc::new(f);
        Self::new(move |next| {
            let f = f.clone();
            Handler::new(move |req| f(req, next.clone()))
        })
    }

    /// Adapt a tower layer, e.g. one from `tower_http`.
    pub fn from_layer<L>(layer: L) -> Self
    where
        L: Layer<Handler> + Send + Sync + 'static,
        L::Service: Service<Request, Error = Infallible> + Clone + Send + Sync + 'static,
        <L::Service as Service<Request>>::Response: IntoResponse,
        <L::Service as Service<Request>>::Future: Send + 'static,
    {
        Self::new(move |next| Handler::from_service(layer.layer(next)))
    }

    /// Wrap `handler`.
    pub fn apply(&self, handler: Handler) -> Handler {
        (self.inner)(handler)
    }
}

impl fmt::Debug for Middleware {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Middleware").finish_non_exhaustive()
    }
}
