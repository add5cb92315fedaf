//! Method-aware router with scoped middleware.
//!
//! # Responsibilities
//! - Own the multiplexer and the enrolled middleware stack
//! - Compose each handler with a snapshot of the stack at registration
//! - Open groups that extend the stack without leaking to siblings
//! - Freeze into a `tower::Service` for the serving phase
//!
//! # Design Decisions
//! - Middleware enrolled after a registration never affects that route
//! - A group borrows the parent's multiplexer for the duration of its body,
//!   so it cannot outlive the callback
//! - Configuration needs `&mut`; serving goes through an `Arc`, no locks

use std::convert::Infallible;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::http::Method;
use futures_util::future::BoxFuture;
use tower::Service;

use super::{Mux, RouteError, RouteKey};
use crate::http::{Handler, Request, Response};
use crate::middleware::{compose, Middleware};

fn register(
    mux: &mut Mux,
    stack: &[Middleware],
    method: &str,
    path: &str,
    handler: Handler,
    local: &[Middleware],
) -> Result<(), RouteError> {
    let composed = compose(stack, local, handler);
    tracing::trace!(
        method,
        path,
        layers = stack.len() + local.len(),
        "Composed route handler"
    );
    mux.register(&format!("{method} {path}"), composed)
}

/// Registration operations shared by [`Router`] and [`Group`].
macro_rules! registration_methods {
    ($($(#[$doc:meta])* $name:ident => $method:expr;)*) => {
        /// Append middleware to the enrolled stack.
        ///
        /// Only routes registered afterwards (and groups opened afterwards)
        /// run it.
        pub fn use_middleware(&mut self, middleware: impl IntoIterator<Item = Middleware>) {
            self.stack.extend(middleware);
        }

        /// Run `body` with a child router sharing this multiplexer and a copy
        /// of the current middleware stack.
        ///
        /// Middleware the child enrolls stays inside the group.
        pub fn group<F>(&mut self, body: F) -> Result<(), RouteError>
        where
            F: FnOnce(&mut Group<'_>) -> Result<(), RouteError>,
        {
            let mut child = Group {
                mux: &mut self.mux,
                stack: self.stack.clone(),
            };
            body(&mut child)
        }

        /// Register `handler` for a method token and path pattern, wrapped by
        /// the enrolled stack and then by `middleware`.
        pub fn handle(
            &mut self,
            method: &str,
            path: &str,
            handler: Handler,
            middleware: &[Middleware],
        ) -> Result<(), RouteError> {
            register(&mut self.mux, &self.stack, method, path, handler, middleware)
        }

        /// Register `handler` under a caller-supplied method token.
        pub fn custom(
            &mut self,
            method: &str,
            path: &str,
            handler: Handler,
            middleware: &[Middleware],
        ) -> Result<(), RouteError> {
            self.handle(method, path, handler, middleware)
        }

        $(
            $(#[$doc])*
            pub fn $name(
                &mut self,
                path: &str,
                handler: Handler,
                middleware: &[Middleware],
            ) -> Result<(), RouteError> {
                self.handle($method.as_str(), path, handler, middleware)
            }
        )*

        /// The enrolled middleware stack.
        pub fn middleware(&self) -> &[Middleware] {
            &self.stack
        }
    };
}

macro_rules! impl_registration {
    ($ty:ty) => {
        impl $ty {
            registration_methods! {
                /// Register a `GET` route.
                get => Method::GET;
                /// Register a `POST` route.
                post => Method::POST;
                /// Register a `PUT` route.
                put => Method::PUT;
                /// Register a `DELETE` route.
                delete => Method::DELETE;
                /// Register a `PATCH` route.
                patch => Method::PATCH;
                /// Register a `HEAD` route.
                head => Method::HEAD;
                /// Register an `OPTIONS` route.
                options => Method::OPTIONS;
            }
        }
    };
}

/// Root router: owns the multiplexer.
///
/// ```
/// use gor::http::{Handler, Request};
/// use gor::Router;
///
/// let mut router = Router::new();
/// router
///     .get("/hello", Handler::new(|_req: Request| async { "hi" }), &[])
///     .unwrap();
/// let service = router.into_service();
/// ```
#[derive(Debug, Default)]
pub struct Router {
    mux: Mux,
    stack: Vec<Middleware>,
}

impl Router {
    /// Create a router with an empty stack and a fresh multiplexer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a router whose stack starts with `middleware`, in order.
    pub fn with_middleware(middleware: impl IntoIterator<Item = Middleware>) -> Self {
        Self {
            mux: Mux::new(),
            stack: middleware.into_iter().collect(),
        }
    }

    /// Dispatch a request through the multiplexer.
    pub fn serve(&self, req: Request) -> BoxFuture<'static, Response> {
        self.mux.serve(req)
    }

    /// Keys registered so far, from this router and all of its groups.
    pub fn routes(&self) -> impl Iterator<Item = &RouteKey> {
        self.mux.routes()
    }

    /// Finish configuration and produce the shareable request service.
    pub fn into_service(self) -> RouterService {
        RouterService {
            mux: Arc::new(self.mux),
        }
    }
}

impl_registration!(Router);

/// Child router handed to a [`Router::group`] body.
#[derive(Debug)]
pub struct Group<'a> {
    mux: &'a mut Mux,
    stack: Vec<Middleware>,
}

impl_registration!(Group<'_>);

/// Frozen router, cheap to clone across connections.
#[derive(Debug, Clone)]
pub struct RouterService {
    mux: Arc<Mux>,
}

impl RouterService {
    pub fn serve(&self, req: Request) -> BoxFuture<'static, Response> {
        self.mux.serve(req)
    }

    pub fn routes(&self) -> impl Iterator<Item = &RouteKey> {
        self.mux.routes()
    }
}

impl Service<Request> for RouterService {
    type Response = Response;
    type Error = Infallible;
    type Future = BoxFuture<'static, Result<Response, Infallible>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request) -> Self::Future {
        let fut = self.mux.serve(req);
        Box::pin(async move { Ok(fut.await) })
    }
}
