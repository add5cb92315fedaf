//! Request-scoped data attached by the multiplexer.
//!
//! # Responsibilities
//! - Carry path parameters captured during pattern matching
//! - Give handlers and middleware typed access through an extension trait
//!
//! # Design Decisions
//! - Parameters live in request extensions, so they survive middleware
//! - Only inserted when the matched pattern captured something

use super::Request;

/// Path parameters captured by the matched route pattern.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathParams {
    params: Vec<(String, String)>,
}

impl PathParams {
    /// Build from captured `(name, value)` pairs, in pattern order.
    pub fn new(params: Vec<(String, String)>) -> Self {
        Self { params }
    }

    /// Value of the named parameter, if the pattern captured it.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }
}

/// Extension trait for reading path parameters off a request.
pub trait PathParamsExt {
    /// All captured path parameters, if any.
    fn path_params(&self) -> Option<&PathParams>;

    /// A single captured path parameter.
    fn path_param(&self, name: &str) -> Option<&str> {
        self.path_params().and_then(|params| params.get(name))
    }
}

impl PathParamsExt for Request {
    fn path_params(&self) -> Option<&PathParams> {
        self.extensions().get::<PathParams>()
    }
}
