//! waypost-router: host- and method-aware trie HTTP router
//!
//! Routes are registered as `METHOD [HOST]/PATH` patterns and mapped to
//! arbitrary handler values. A lookup walks host, then method, then path
//! segments and returns the single best match with its path parameters.
//!
//! ## Path Syntax
//! - `{name}` - Named parameter (captures one segment)
//! - `{name...}` - Catch-all (captures the remaining path, must be last)
//! - trailing `/` - Anonymous catch-all: `/static/` matches everything below
//! - `/{$}` - End anchor: `/static/{$}` matches only `/static/`
//!
//! ## Priority
//! 1. Exact host, then any host
//! 2. Literal segment
//! 3. Parameter
//! 4. Catch-all
//!
//! ## Example
//! ```
//! use waypost_router::Router;
//!
//! let mut router: Router<&str> = Router::new();
//! router.handle("GET /users", "list").unwrap();
//! router.handle("GET /users/{id}", "show").unwrap();
//! router.handle("GET api.example.com/files/{path...}", "files").unwrap();
//!
//! let m = router.at("GET", "", "/users/123").unwrap();
//! assert_eq!(*m.handler, "show");
//! assert_eq!(m.param("id"), Some("123"));
//!
//! let m = router.at("GET", "api.example.com", "/files/docs/readme.md").unwrap();
//! assert_eq!(m.param("path"), Some("docs/readme.md"));
//! assert_eq!(m.pattern, "GET api.example.com/files/{path...}");
//!
//! assert!(router.at("POST", "", "/users").is_none());
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all)]

mod config;
mod error;
mod node;
mod pattern;

pub use config::{Collision, RouterConfig};
pub use error::{PatternError, RouteError, RouteErrorKind};
pub use pattern::{Pattern, Segment};

use node::Node;
use std::collections::HashMap;

/// Route match result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match<'r, H> {
    /// The handler registered for the winning pattern
    pub handler: &'r H,
    /// Captured path parameters by name
    pub params: HashMap<String, String>,
    /// Canonical form of the winning pattern
    pub pattern: String,
}

impl<H> Match<'_, H> {
    /// Get a single parameter
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}

/// Trie HTTP router
///
/// Lookups never mutate the router. Registration needs `&mut self`; share a
/// router across threads behind a lock once it is built.
#[derive(Debug)]
pub struct Router<H> {
    root: Node<H>,
    config: RouterConfig,
    len: usize,
}

impl<H> Router<H> {
    /// Create a new router
    pub fn new() -> Self {
        Self::with_config(RouterConfig::default())
    }

    pub fn with_config(config: RouterConfig) -> Self {
        Self {
            root: Node::default(),
            config,
            len: 0,
        }
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Register a route
    ///
    /// # Arguments
    /// * `pattern` - `METHOD [HOST]/PATH`, e.g. `GET /users/{id}`
    /// * `handler` - Value returned on match. `None` is rejected.
    ///
    /// Nothing is inserted when an error is returned.
    ///
    /// # Example
    /// ```
    /// use waypost_router::Router;
    ///
    /// let mut router: Router<u32> = Router::new();
    /// router.handle("GET /users/{id}", 0).unwrap();
    ///
    /// let err = router.handle("GET", 1).unwrap_err();
    /// assert_eq!(err.pattern(), "GET");
    ///
    /// assert!(router.handle("POST /users", None).is_err());
    /// assert_eq!(router.len(), 1);
    /// ```
    pub fn handle(&mut self, pattern: &str, handler: impl Into<Option<H>>) -> Result<(), RouteError> {
        let result = self.try_insert(pattern, handler.into());
        if let Err(ref err) = result {
            tracing::debug!(pattern, error = %err.kind(), "route rejected");
        }
        result
    }

    fn try_insert(&mut self, spec: &str, handler: Option<H>) -> Result<(), RouteError> {
        let handler = handler.ok_or_else(|| RouteError::new(spec, RouteErrorKind::MissingHandler))?;
        let pattern = Pattern::parse(spec).map_err(|e| RouteError::new(spec, e))?;

        let method = pattern.method().to_string();
        let host = pattern.host().to_string();
        let canonical = pattern.to_string();

        match self.root.insert(pattern, handler, self.config.collision) {
            Ok(None) => {
                self.len += 1;
                tracing::debug!(pattern = %canonical, %method, %host, "route registered");
                Ok(())
            }
            Ok(Some(previous)) => {
                tracing::warn!(pattern = %canonical, replaced = %previous, "route replaced");
                Ok(())
            }
            Err(kind) => Err(RouteError::new(spec, kind)),
        }
    }

    /// Find the route for a request
    ///
    /// # Arguments
    /// * `method` - Request method, compared exactly
    /// * `host` - Request host without port, or empty
    /// * `path` - Request path, starting with `/`
    ///
    /// # Returns
    /// `Some(Match)` with handler, params and pattern, or `None` if nothing
    /// matches
    pub fn at(&self, method: &str, host: &str, path: &str) -> Option<Match<'_, H>> {
        let found = self.root.lookup(host, method, path, self.config.head_fallback);
        tracing::trace!(%method, %host, %path, matched = found.is_some(), "route lookup");

        let (route, captures) = found?;
        Some(Match {
            handler: &route.handler,
            params: route.params(&captures),
            pattern: route.pattern.to_string(),
        })
    }

    /// Number of registered routes
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Canonical strings of every registered pattern, sorted
    pub fn patterns(&self) -> Vec<String> {
        let mut patterns: Vec<String> = self
            .root
            .routes()
            .into_iter()
            .map(|route| route.pattern.to_string())
            .collect();
        patterns.sort();
        patterns
    }

    /// Check if a method has any routes registered, on any host
    pub fn has_method(&self, method: &str) -> bool {
        self.root.has_method(method)
    }
}

impl<H> Default for Router<H> {
    fn default() -> Self {
        Self::new()
    }
}
