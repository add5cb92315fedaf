//! Pattern-matching request multiplexer.
//!
//! # Responsibilities
//! - Accept `"<METHOD> <PATH>"` registrations
//! - Match incoming method + path against registered patterns
//! - Answer 404 / 405 when nothing matches
//!
//! # Design Decisions
//! - One matchit radix tree per method: lookup is O(path length)
//! - `HEAD` falls back to the `GET` route when no `HEAD` route matches
//! - 405 responses list every method whose pattern matched the path
//! - Written only during configuration; read-only while serving

use std::future::ready;

use axum::http::{header, Method, StatusCode};
use axum::response::IntoResponse;
use futures_util::future::BoxFuture;

use super::{RouteError, RouteKey};
use crate::http::{Handler, PathParams, Request, Response};

/// Outcome of looking a request up in the route tables.
#[derive(Debug)]
enum Lookup {
    Found(Handler, PathParams),
    MethodNotAllowed(Vec<Method>),
    NotFound,
}

/// The shared dispatch table every router and group registers into.
#[derive(Default)]
pub struct Mux {
    tables: Vec<(Method, matchit::Router<Handler>)>,
    keys: Vec<RouteKey>,
}

impl Mux {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` under `key`.
    pub fn register(&mut self, key: &str, handler: Handler) -> Result<(), RouteError> {
        let parsed = RouteKey::parse(key)?;

        if self.keys.contains(&parsed) {
            return Err(RouteError::DuplicatePattern {
                key: key.to_string(),
            });
        }

        let table = self.table_mut(parsed.method());
        match table.insert(parsed.path(), handler) {
            Ok(()) => {}
            Err(matchit::InsertError::Conflict { with }) => {
                return Err(RouteError::Conflict {
                    key: key.to_string(),
                    existing: format!("{} {}", parsed.method(), with),
                });
            }
            Err(e) => return Err(RouteError::malformed(key, e.to_string())),
        }

        tracing::debug!(key = %parsed, "Route registered");
        self.keys.push(parsed);
        Ok(())
    }

    /// Registered keys, in registration order.
    pub fn routes(&self) -> impl Iterator<Item = &RouteKey> {
        self.keys.iter()
    }

    /// Dispatch a request to the matching handler.
    pub fn serve(&self, mut req: Request) -> BoxFuture<'static, Response> {
        match self.lookup(req.method(), req.uri().path()) {
            Lookup::Found(handler, params) => {
                if !params.is_empty() {
                    req.extensions_mut().insert(params);
                }
                handler.run(req)
            }
            Lookup::MethodNotAllowed(allowed) => {
                tracing::trace!(
                    method = %req.method(),
                    path = %req.uri().path(),
                    "Method not allowed"
                );
                Box::pin(ready(method_not_allowed(&allowed)))
            }
            Lookup::NotFound => {
                tracing::trace!(
                    method = %req.method(),
                    path = %req.uri().path(),
                    "No route matched"
                );
                Box::pin(ready(not_found()))
            }
        }
    }

    fn lookup(&self, method: &Method, path: &str) -> Lookup {
        if let Some(found) = self.find(method, path) {
            return found;
        }
        if method == Method::HEAD {
            if let Some(found) = self.find(&Method::GET, path) {
                return found;
            }
        }

        let mut allowed: Vec<Method> = self
            .tables
            .iter()
            .filter(|(_, table)| table.at(path).is_ok())
            .map(|(m, _)| m.clone())
            .collect();
        if allowed.is_empty() {
            return Lookup::NotFound;
        }
        if allowed.contains(&Method::GET) && !allowed.contains(&Method::HEAD) {
            allowed.push(Method::HEAD);
        }
        allowed.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        Lookup::MethodNotAllowed(allowed)
    }

    fn find(&self, method: &Method, path: &str) -> Option<Lookup> {
        let (_, table) = self.tables.iter().find(|(m, _)| m == method)?;
        let matched = table.at(path).ok()?;
        let params = matched
            .params
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Some(Lookup::Found(matched.value.clone(), PathParams::new(params)))
    }

    fn table_mut(&mut self, method: &Method) -> &mut matchit::Router<Handler> {
        let index = match self.tables.iter().position(|(m, _)| m == method) {
            Some(index) => index,
            None => {
                self.tables.push((method.clone(), matchit::Router::new()));
                self.tables.len() - 1
            }
        };
        &mut self.tables[index].1
    }
}

impl std::fmt::Debug for Mux {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mux").field("routes", &self.keys).finish()
    }
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "404 page not found").into_response()
}

fn method_not_allowed(allowed: &[Method]) -> Response {
    let allow = allowed
        .iter()
        .map(Method::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    (
        StatusCode::METHOD_NOT_ALLOWED,
        [(header::ALLOW, allow)],
        "Method Not Allowed",
    )
        .into_response()
}
