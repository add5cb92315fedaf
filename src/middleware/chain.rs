//! Middleware chain builder.

use super::Middleware;
use crate::http::Handler;

/// Compose `stack ++ local` around `handler`.
///
/// The first middleware of `stack` becomes the outermost layer; the last
/// middleware of `local` sits directly around `handler`. With both lists
/// empty, `handler` is returned untouched.
pub fn compose(stack: &[Middleware], local: &[Middleware], handler: Handler) -> Handler {
    stack
        .iter()
        .chain(local)
        .rev()
        .fold(handler, |inner, middleware| middleware.apply(inner))
}
