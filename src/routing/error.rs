//! Registration errors surfaced by the multiplexer.

use thiserror::Error;

/// Why a route could not be registered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// The exact `"<METHOD> <PATH>"` key is already registered.
    #[error("pattern `{key}` is already registered")]
    DuplicatePattern { key: String },

    /// The path overlaps an existing pattern for the same method.
    #[error("pattern `{key}` conflicts with registered pattern `{existing}`")]
    Conflict { key: String, existing: String },

    /// The key or its path pattern is syntactically invalid.
    #[error("malformed route key `{key}`: {reason}")]
    MalformedKey { key: String, reason: String },
}

impl RouteError {
    pub(crate) fn malformed(key: &str, reason: impl Into<String>) -> Self {
        RouteError::MalformedKey {
            key: key.to_string(),
            reason: reason.into(),
        }
    }

    /// The key the failed registration was made under.
    pub fn key(&self) -> &str {
        match self {
            RouteError::DuplicatePattern { key }
            | RouteError::Conflict { key, .. }
            | RouteError::MalformedKey { key, .. } => key,
        }
    }
}
