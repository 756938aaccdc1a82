use std::collections::HashMap;
use std::sync::Arc;

use regex::Regex;

use crate::error::RouteError;
use crate::routing::handlers::Handler;
use crate::storage::FileStore;

/// Immutable route table.
///
/// Exact paths are looked up first. On a miss, patterns are tried in the
/// order they were registered and the first match wins.
#[derive(Debug)]
pub struct Router {
    exact: HashMap<String, Handler>,
    patterns: Vec<(Regex, Handler)>,
}

#[derive(Debug, Default)]
pub struct RouterBuilder {
    exact: HashMap<String, Handler>,
    patterns: Vec<(Regex, Handler)>,
}

impl RouterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an exact-match route. Registering the same path twice keeps the
    /// later handler.
    pub fn register(mut self, path: impl Into<String>, handler: Handler) -> Self {
        self.exact.insert(path.into(), handler);
        self
    }

    /// Appends a regex route after all previously registered ones.
    pub fn register_pattern(mut self, pattern: &str, handler: Handler) -> Result<Self, RouteError> {
        let re = Regex::new(pattern).map_err(|source| RouteError {
            pattern: pattern.to_string(),
            source,
        })?;
        self.patterns.push((re, handler));
        Ok(self)
    }

    pub fn build(self) -> Router {
        Router {
            exact: self.exact,
            patterns: self.patterns,
        }
    }
}

impl Router {
    pub fn builder() -> RouterBuilder {
        RouterBuilder::new()
    }

    /// The server's built-in routes.
    pub fn with_defaults(store: Arc<dyn FileStore>) -> Result<Self, RouteError> {
        Ok(Self::builder()
            .register("/", Handler::Root)
            .register("/user-agent", Handler::UserAgent)
            .register_pattern(r"^/echo/[^/]+$", Handler::Echo)?
            .register_pattern(r"^/files/[^/]+$", Handler::Files(store))?
            .build())
    }

    /// Returns the handler for `path`, or `None` if nothing matches.
    pub fn resolve(&self, path: &str) -> Option<&Handler> {
        if let Some(handler) = self.exact.get(path) {
            return Some(handler);
        }

        self.patterns
            .iter()
            .find(|(re, _)| re.is_match(path))
            .map(|(_, handler)| handler)
    }
}
