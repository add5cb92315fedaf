//! Terminal request handlers.
//!
//! # Responsibilities
//! - Wrap async closures and tower services behind one clonable type
//! - Convert any `IntoResponse` output into a concrete `Response`
//! - Expose the handler as a `tower::Service` so layers can wrap it

use std::convert::Infallible;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::response::IntoResponse;
use futures_util::future::BoxFuture;
use tower::{Service, ServiceExt};

use super::{Request, Response};

type HandlerFn = dyn Fn(Request) -> BoxFuture<'static, Response> + Send + Sync;

/// A request handler: consumes a request, produces a response.
///
/// Cloning is cheap; clones share the same underlying function.
#[derive(Clone)]
pub struct Handler {
    inner: Arc<HandlerFn>,
}

impl Handler {
    /// Create a handler from an async function or closure.
    ///
    /// ```
    /// use gor::http::{Handler, Request};
    ///
    /// let hello = Handler::new(|_req: Request| async { "hi" });
    /// ```
    pub fn new<F, Fut, R>(f: F) -> Self
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = R> + Send + 'static,
        R: IntoResponse,
    {
        Self {
            inner: Arc::new(move |req| -> BoxFuture<'static, Response> {
                let fut = f(req);
                Box::pin(async move { fut.await.into_response() })
            }),
        }
    }

    /// Create a handler from an infallible tower service.
    ///
    /// The service is cloned per request, as tower services are not
    /// required to be callable through a shared reference.
    pub fn from_service<S>(service: S) -> Self
    where
        S: Service<Request, Error = Infallible> + Clone + Send + Sync + 'static,
        S::Response: IntoResponse,
        S::Future: Send + 'static,
    {
        Self {
            inner: Arc::new(move |req| -> BoxFuture<'static, Response> {
                let service = service.clone();
                Box::pin(async move {
                    match service.oneshot(req).await {
                        Ok(response) => response.into_response(),
                        Err(never) => match never {},
                    }
                })
            }),
        }
    }

    /// Invoke the handler.
    pub fn run(&self, req: Request) -> BoxFuture<'static, Response> {
        (self.inner)(req)
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler").finish_non_exhaustive()
    }
}

impl Service<Request> for Handler {
    type Response = Response;
    type Error = Infallible;
    type Future = BoxFuture<'static, Result<Response, Infallible>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request) -> Self::Future {
        let fut = self.run(req);
        Box::pin(async move { Ok(fut.await) })
    }
}
