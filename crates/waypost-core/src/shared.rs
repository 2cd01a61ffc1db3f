//! Lock-guarded router shared between setup code and request tasks
//!
//! The trie itself has no internal synchronization. `SharedRouter` holds
//! the write lock for registration and the read lock for lookups, so many
//! lookups run concurrently and a late registration waits for them.

use crate::request::route_parts;
use crate::Result;
use http::Request;
use parking_lot::{RwLock, RwLockReadGuard};
use std::collections::HashMap;
use std::sync::Arc;
use waypost_router::{Match, Router, RouterConfig};

/// Route match result that owns its handler
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch<H> {
    /// The matched handler/value
    pub value: H,
    /// Captured path parameters
    pub params: HashMap<String, String>,
    /// Canonical form of the winning pattern
    pub pattern: String,
}

impl<H: Clone> From<Match<'_, H>> for RouteMatch<H> {
    fn from(m: Match<'_, H>) -> Self {
        Self {
            value: m.handler.clone(),
            params: m.params,
            pattern: m.pattern,
        }
    }
}

/// Cloneable handle to a router behind a read/write lock
#[derive(Debug)]
pub struct SharedRouter<H> {
    inner: Arc<RwLock<Router<H>>>,
}

impl<H> Clone for SharedRouter<H> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<H> SharedRouter<H> {
    pub fn new() -> Self {
        Self::from(Router::new())
    }

    pub fn with_config(config: RouterConfig) -> Self {
        Self::from(Router::with_config(config))
    }

    /// Register a route under the write lock
    pub fn handle(&self, pattern: &str, handler: impl Into<Option<H>>) -> Result<()> {
        self.inner.write().handle(pattern, handler)?;
        Ok(())
    }

    /// Look up a route and hand the borrowed result to `f` while the read
    /// lock is held
    pub fn match_with<R>(
        &self,
        method: &str,
        host: &str,
        path: &str,
        f: impl FnOnce(Option<Match<'_, H>>) -> R,
    ) -> R {
        let router = self.inner.read();
        let found = router.at(method, host, path);
        f(found)
    }

    /// Look up a route, cloning the handler out of the lock
    pub fn resolve(&self, method: &str, host: &str, path: &str) -> Option<RouteMatch<H>>
    where
        H: Clone,
    {
        self.match_with(method, host, path, |found| found.map(RouteMatch::from))
    }

    /// [`resolve`](Self::resolve) for an `http::Request`
    pub fn resolve_request<B>(&self, req: &Request<B>) -> Result<Option<RouteMatch<H>>>
    where
        H: Clone,
    {
        let parts = route_parts(req)?;
        Ok(self.resolve(parts.method, parts.host, parts.path))
    }

    /// Direct read access, e.g. to match several requests under one lock
    pub fn read(&self) -> RwLockReadGuard<'_, Router<H>> {
        self.inner.read()
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }
}

impl<H> From<Router<H>> for SharedRouter<H> {
    fn from(router: Router<H>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(router)),
        }
    }
}

impl<H> Default for SharedRouter<H> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use std::thread;

    #[test]
    fn test_handle_and_resolve() {
        let router: SharedRouter<u32> = SharedRouter::new();
        router.handle("GET /users/{id}", 7).unwrap();

        let m = router.resolve("GET", "", "/users/42").unwrap();
        assert_eq!(m.value, 7);
        assert_eq!(m.params.get("id"), Some(&"42".to_string()));
        assert_eq!(m.pattern, "GET /users/{id}");
        assert!(router.resolve("GET", "", "/posts/42").is_none());
    }

    #[test]
    fn test_errors_are_wrapped() {
        let router: SharedRouter<u32> = SharedRouter::new();

        let err = router.handle("GET", 1).unwrap_err();
        match err {
            Error::Route(e) => assert_eq!(e.pattern(), "GET"),
            other => panic!("unexpected error: {other}"),
        }
        assert!(router.handle("GET /a", None).is_err());
        assert!(router.is_empty());
    }

    #[test]
    fn test_match_with_borrows() {
        let router: SharedRouter<String> = SharedRouter::new();
        router.handle("GET /files/{path...}", "files".to_string()).unwrap();

        let len = router.match_with("GET", "", "/files/a/b", |m| {
            let m = m.unwrap();
            assert_eq!(m.param("path"), Some("a/b"));
            m.handler.len()
        });
        assert_eq!(len, 5);
    }

    #[test]
    fn test_resolve_request() {
        let router: SharedRouter<&str> = SharedRouter::new();
        router.handle("GET api.example.com/", "api").unwrap();

        let req = Request::get("http://api.example.com/v1/status").body(()).unwrap();
        let m = router.resolve_request(&req).unwrap().unwrap();
        assert_eq!(m.value, "api");
        assert_eq!(m.params.get(""), Some(&"v1/status".to_string()));
    }

    #[test]
    fn test_concurrent_lookups() {
        let router: SharedRouter<usize> = SharedRouter::new();
        for i in 0..16 {
            router.handle(&format!("GET /r{i}/{{id}}"), i).unwrap();
        }

        let workers: Vec<_> = (0..4)
            .map(|_| {
                let router = router.clone();
                thread::spawn(move || {
                    (0..16)
                        .map(|i| router.resolve("GET", "", &format!("/r{i}/x")).unwrap().value)
                        .sum::<usize>()
                })
            })
            .collect();

        for worker in workers {
            assert_eq!(worker.join().unwrap(), (0..16).sum::<usize>());
        }
        assert_eq!(router.len(), 16);
    }
}
