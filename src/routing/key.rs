//! Registration keys of the form `"<METHOD> <PATH>"`.
//!
//! # Design Decisions
//! - Exactly one ASCII space separates method and path
//! - Method tokens are case-sensitive; `get` is a custom method, not `GET`
//! - Path syntax is left to the matcher; only the leading `/` is checked here

use std::fmt;
use std::str::FromStr;

use axum::http::Method;

use super::RouteError;

/// A parsed `"<METHOD> <PATH>"` registration key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RouteKey {
    method: Method,
    path: String,
}

impl RouteKey {
    /// Parse a key string.
    pub fn parse(key: &str) -> Result<Self, RouteError> {
        let (method, path) = key
            .split_once(' ')
            .ok_or_else(|| RouteError::malformed(key, "missing path"))?;

        if method.is_empty() {
            return Err(RouteError::malformed(key, "missing method"));
        }
        if path.is_empty() {
            return Err(RouteError::malformed(key, "missing path"));
        }
        if !path.starts_with('/') {
            return Err(RouteError::malformed(key, "path must begin with '/'"));
        }
        if path.ends_with(char::is_whitespace) {
            return Err(RouteError::malformed(key, "trailing whitespace after path"));
        }

        let method = Method::from_bytes(method.as_bytes())
            .map_err(|_| RouteError::malformed(key, "invalid method token"))?;

        Ok(Self {
            method,
            path: path.to_string(),
        })
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

impl FromStr for RouteKey {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for RouteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.path)
    }
}
